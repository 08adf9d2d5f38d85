use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamArchiveService, not_found};
use crate::models::ApiResponse;
use crate::services::internal_error;

pub async fn get_archive_item(
    service: &ExamArchiveService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_archive_item(id).await {
        Ok(Some(item)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            item,
            "Archive item retrieved successfully",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to get archive item", e)),
    }
}
