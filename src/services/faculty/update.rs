use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{FacultyService, prepare_input};
use crate::models::faculty::requests::FacultyMemberRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn update_faculty_member(
    service: &FacultyService,
    request: &HttpRequest,
    id: i64,
    member: FacultyMemberRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let input = match prepare_input(&storage, member).await {
        Ok(input) => input,
        Err(response) => return Ok(response),
    };

    match storage.update_faculty_member(id, input).await {
        Ok(Some(member)) => {
            info!("Faculty member {} updated", member.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                member,
                "Faculty member updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FacultyMemberNotFound,
            "Faculty member not found",
        ))),
        Err(e) => Ok(internal_error("Failed to update faculty member", e)),
    }
}
