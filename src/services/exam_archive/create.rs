use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamArchiveService;
use crate::models::ApiResponse;
use crate::models::exam_archive::requests::ExamArchiveRequest;
use crate::services::{internal_error, validation_response};

pub async fn create_archive_item(
    service: &ExamArchiveService,
    request: &HttpRequest,
    item: ExamArchiveRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let item = item.normalize();
    if let Err(errors) = item.validate() {
        return Ok(validation_response(errors));
    }

    match storage.create_archive_item(item).await {
        Ok(item) => {
            info!("Archive item {} ({}) created", item.id, item.course_code);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                item,
                "Archive item created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create archive item", e)),
    }
}
