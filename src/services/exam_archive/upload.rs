use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ExamArchiveService, not_found};
use crate::models::ApiResponse;
use crate::models::exam_archive::requests::ArchiveFileKind;
use crate::services::{internal_error, receive_upload};
use crate::utils::upload::{UploadKind, delete_old_file};

pub async fn upload_archive_pdf(
    service: &ExamArchiveService,
    request: &HttpRequest,
    id: i64,
    kind: ArchiveFileKind,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_archive_item(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found()),
        Err(e) => return Ok(internal_error("Failed to get archive item", e)),
    }

    let file = match receive_upload(payload, UploadKind::ArchivePdf).await {
        Ok(file) => file,
        Err(response) => return Ok(response),
    };

    match storage.set_archive_file(id, kind, &file.web_path).await {
        Ok(Some((item, old_path))) => {
            delete_old_file(UploadKind::ArchivePdf, old_path.as_deref());
            info!("Archive item {} {:?} file set to {}", id, kind, file.web_path);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                item,
                "File uploaded successfully",
            )))
        }
        Ok(None) => {
            file.discard();
            Ok(not_found())
        }
        Err(e) => {
            file.discard();
            Ok(internal_error("Failed to save archive file", e))
        }
    }
}
