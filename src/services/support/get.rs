use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SupportService, not_found};
use crate::models::ApiResponse;
use crate::services::internal_error;

pub async fn get_ticket(
    service: &SupportService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_support_ticket(id).await {
        Ok(Some(ticket)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ticket,
            "Support ticket retrieved successfully",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to get support ticket", e)),
    }
}
