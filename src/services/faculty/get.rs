use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FacultyService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn get_faculty_member(
    service: &FacultyService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_faculty_member(id).await {
        Ok(Some(member)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            member,
            "Faculty member retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FacultyMemberNotFound,
            "Faculty member not found",
        ))),
        Err(e) => Ok(internal_error("Failed to get faculty member", e)),
    }
}
