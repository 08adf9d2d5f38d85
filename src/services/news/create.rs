use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NewsService;
use crate::models::ApiResponse;
use crate::models::news::requests::NewsItemRequest;
use crate::services::{internal_error, validation_response};

pub async fn create_news_item(
    service: &NewsService,
    request: &HttpRequest,
    item: NewsItemRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let input = item.normalize();
    if let Err(errors) = input.validate() {
        return Ok(validation_response(errors));
    }

    match storage.create_news_item(input).await {
        Ok(item) => {
            info!("News item {} ({}) created", item.id, item.title_en);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                item,
                "News item created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create news item", e)),
    }
}
