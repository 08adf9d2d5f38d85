use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FacultyService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, receive_upload};
use crate::utils::upload::{UploadKind, delete_old_file};

pub async fn upload_faculty_photo(
    service: &FacultyService,
    request: &HttpRequest,
    id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_faculty_member(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found()),
        Err(e) => return Ok(internal_error("Failed to get faculty member", e)),
    }

    let file = match receive_upload(payload, UploadKind::FacultyPhoto).await {
        Ok(file) => file,
        Err(response) => return Ok(response),
    };

    match storage.update_faculty_photo(id, &file.web_path).await {
        Ok(Some((member, old_path))) => {
            delete_old_file(UploadKind::FacultyPhoto, old_path.as_deref());
            info!("Faculty member {} photo replaced with {}", id, file.web_path);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                member,
                "Photo uploaded successfully",
            )))
        }
        Ok(None) => {
            file.discard();
            Ok(not_found())
        }
        Err(e) => {
            file.discard();
            Ok(internal_error("Failed to save faculty photo", e))
        }
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::FacultyMemberNotFound,
        "Faculty member not found",
    ))
}
