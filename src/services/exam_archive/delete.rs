use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ExamArchiveService, not_found};
use crate::models::ApiResponse;
use crate::services::internal_error;
use crate::utils::upload::{UploadKind, delete_old_file};

pub async fn delete_archive_item(
    service: &ExamArchiveService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_archive_item(id).await {
        Ok(Some(item)) => {
            delete_old_file(UploadKind::ArchivePdf, item.pdf_url.as_deref());
            delete_old_file(UploadKind::ArchivePdf, item.solution_url.as_deref());
            info!("Archive item {} ({}) deleted", item.id, item.course_code);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Archive item deleted successfully",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to delete archive item", e)),
    }
}
