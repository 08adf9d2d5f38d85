use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{NewsService, not_found};
use crate::models::ApiResponse;
use crate::models::news::requests::NewsItemRequest;
use crate::services::{internal_error, validation_response};

pub async fn update_news_item(
    service: &NewsService,
    request: &HttpRequest,
    id: i64,
    item: NewsItemRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let input = item.normalize();
    if let Err(errors) = input.validate() {
        return Ok(validation_response(errors));
    }

    match storage.update_news_item(id, input).await {
        Ok(Some(item)) => {
            info!("News item {} updated", item.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                item,
                "News item updated successfully",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to update news item", e)),
    }
}
