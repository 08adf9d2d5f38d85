use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SupportService;
use crate::models::ApiResponse;
use crate::models::common::pagination::normalize_paging;
use crate::models::support_tickets::requests::{TicketListParams, TicketListQuery};
use crate::services::internal_error;
use crate::utils::normalize_search;

pub async fn list_tickets(
    service: &SupportService,
    request: &HttpRequest,
    params: TicketListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (page, page_size) = normalize_paging(params.page, params.page_size);

    let query = TicketListQuery {
        page,
        page_size,
        search: normalize_search(params.q.as_deref()),
    };

    match storage.list_support_tickets(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Support tickets retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list support tickets", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::support_tickets::requests::SupportTicketForm;
    use crate::services::test_support::{body_json, memory_storage, request_with};

    fn form(i: usize) -> SupportTicketForm {
        SupportTicketForm {
            full_name: format!("Student {i}"),
            email: format!("s{i}@example.com"),
            description: "Exam link is broken".to_string(),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn test_paging_is_clamped() {
        let storage = memory_storage().await;
        for i in 0..12 {
            storage.create_support_ticket(form(i), None).await.unwrap();
        }
        let request = request_with(&storage);
        let service = SupportService::new_lazy();

        let params = TicketListParams {
            page: Some(0),
            page_size: Some(500),
            q: None,
        };
        let body = body_json(list_tickets(&service, &request, params).await.unwrap()).await;
        assert_eq!(body["data"]["pagination"]["page"], 1);
        assert_eq!(body["data"]["pagination"]["page_size"], 10);
        assert_eq!(body["data"]["pagination"]["total"], 12);
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 10);

        let params = TicketListParams {
            page: Some(2),
            page_size: Some(-3),
            q: Some("  STUDENT 1".to_string()),
        };
        let body = body_json(list_tickets(&service, &request, params).await.unwrap()).await;
        // Student 1, 10, 11
        assert_eq!(body["data"]["pagination"]["total"], 3);
        assert_eq!(body["data"]["query"], "STUDENT 1");
    }
}
