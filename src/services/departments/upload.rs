use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, receive_upload};
use crate::utils::upload::{UploadKind, delete_old_file};

pub async fn upload_department_image(
    service: &DepartmentService,
    request: &HttpRequest,
    id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 先确认记录存在，避免留下无主文件
    match storage.get_department_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found()),
        Err(e) => return Ok(internal_error("Failed to get department", e)),
    }

    let file = match receive_upload(payload, UploadKind::DepartmentImage).await {
        Ok(file) => file,
        Err(response) => return Ok(response),
    };

    match storage.update_department_image(id, &file.web_path).await {
        Ok(Some((department, old_path))) => {
            delete_old_file(UploadKind::DepartmentImage, old_path.as_deref());
            info!(
                "Department {} image replaced with {} ({} bytes)",
                id, file.web_path, file.size
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                department,
                "Department image uploaded successfully",
            )))
        }
        Ok(None) => {
            file.discard();
            Ok(not_found())
        }
        Err(e) => {
            file.discard();
            Ok(internal_error("Failed to save department image", e))
        }
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::DepartmentNotFound,
        "Department not found",
    ))
}
