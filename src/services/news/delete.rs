use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{NewsService, not_found};
use crate::models::ApiResponse;
use crate::services::internal_error;

// 图片文件保留在磁盘上
pub async fn delete_news_item(
    service: &NewsService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_news_item(id).await {
        Ok(Some(item)) => {
            info!("News item {} ({}) deleted", item.id, item.title_en);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "News item deleted successfully",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to delete news item", e)),
    }
}
