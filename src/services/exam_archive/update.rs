use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ExamArchiveService, not_found};
use crate::models::ApiResponse;
use crate::models::exam_archive::requests::ExamArchiveRequest;
use crate::services::{internal_error, validation_response};
use crate::utils::upload::{UploadKind, delete_old_file};

pub async fn update_archive_item(
    service: &ExamArchiveService,
    request: &HttpRequest,
    id: i64,
    item: ExamArchiveRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let item = item.normalize();
    if let Err(errors) = item.validate() {
        return Ok(validation_response(errors));
    }

    match storage.update_archive_item(id, item).await {
        Ok(Some((item, removed_solution))) => {
            if removed_solution.is_some() {
                delete_old_file(UploadKind::ArchivePdf, removed_solution.as_deref());
                info!("Archive item {} solution removed", item.id);
            }
            info!("Archive item {} updated", item.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                item,
                "Archive item updated successfully",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to update archive item", e)),
    }
}
