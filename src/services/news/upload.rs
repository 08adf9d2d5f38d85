use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{NewsService, not_found};
use crate::models::ApiResponse;
use crate::services::{internal_error, receive_upload};
use crate::utils::upload::{UploadKind, delete_old_file};

pub async fn upload_news_image(
    service: &NewsService,
    request: &HttpRequest,
    id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_news_item(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found()),
        Err(e) => return Ok(internal_error("Failed to get news item", e)),
    }

    let file = match receive_upload(payload, UploadKind::NewsImage).await {
        Ok(file) => file,
        Err(response) => return Ok(response),
    };

    match storage.update_news_image(id, &file.web_path).await {
        Ok(Some((item, old_path))) => {
            delete_old_file(UploadKind::NewsImage, old_path.as_deref());
            info!("News item {} image replaced with {}", id, file.web_path);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                item,
                "News image uploaded successfully",
            )))
        }
        Ok(None) => {
            file.discard();
            Ok(not_found())
        }
        Err(e) => {
            file.discard();
            Ok(internal_error("Failed to save news image", e))
        }
    }
}
