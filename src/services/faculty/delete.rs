use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FacultyService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

// 照片文件保留在磁盘上
pub async fn delete_faculty_member(
    service: &FacultyService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_faculty_member(id).await {
        Ok(Some(member)) => {
            info!("Faculty member {} ({}) deleted", member.id, member.full_name_en);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Faculty member deleted successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FacultyMemberNotFound,
            "Faculty member not found",
        ))),
        Err(e) => Ok(internal_error("Failed to delete faculty member", e)),
    }
}
