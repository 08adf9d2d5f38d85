use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NewsService;
use crate::models::ApiResponse;
use crate::models::news::entities::NewsListResponse;
use crate::models::news::requests::{NewsListParams, NewsListQuery};
use crate::services::internal_error;
use crate::utils::normalize_search;

pub async fn list_news(
    service: &NewsService,
    request: &HttpRequest,
    params: NewsListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let query = normalize_search(params.q.as_deref());

    let result = storage
        .list_news(NewsListQuery {
            category: params.category,
            search: query.clone(),
            published_only: params.published_only.unwrap_or(true),
        })
        .await;

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NewsListResponse {
                items,
                category: params.category,
                query,
            },
            "News retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list news", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::news::entities::NewsCategory;
    use crate::models::news::requests::NewsItemInput;
    use crate::services::test_support::{body_json, memory_storage, request_with};

    fn item(title: &str, body: &str, published: bool) -> NewsItemInput {
        NewsItemInput {
            title_ar: title.to_string(),
            title_en: title.to_string(),
            body_ar: None,
            body_en: Some(body.to_string()),
            category: NewsCategory::Announcement,
            publish_date: chrono::Utc::now(),
            is_published: published,
        }
    }

    #[actix_web::test]
    async fn test_search_matches_case_insensitively_and_hides_drafts() {
        let storage = memory_storage().await;
        storage
            .create_news_item(item("Robotics Workshop", "Hands-on ROBOTICS session", true))
            .await
            .unwrap();
        storage
            .create_news_item(item("Graduation ceremony", "Hall A", true))
            .await
            .unwrap();
        storage
            .create_news_item(item("Robotics draft", "not yet", false))
            .await
            .unwrap();
        let request = request_with(&storage);

        let params = NewsListParams {
            q: Some("  robotics ".to_string()),
            ..Default::default()
        };
        let resp = list_news(&NewsService::new_lazy(), &request, params).await.unwrap();
        let body = body_json(resp).await;
        let items = body["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title_en"], "Robotics Workshop");
        assert_eq!(body["data"]["query"], "robotics");

        let params = NewsListParams {
            q: Some("ROBOTICS".to_string()),
            published_only: Some(false),
            ..Default::default()
        };
        let resp = list_news(&NewsService::new_lazy(), &request, params).await.unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    }
}
