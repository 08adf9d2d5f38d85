use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{FacultyService, prepare_input};
use crate::models::ApiResponse;
use crate::models::faculty::requests::FacultyMemberRequest;
use crate::services::internal_error;

pub async fn create_faculty_member(
    service: &FacultyService,
    request: &HttpRequest,
    member: FacultyMemberRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let input = match prepare_input(&storage, member).await {
        Ok(input) => input,
        Err(response) => return Ok(response),
    };

    match storage.create_faculty_member(input).await {
        Ok(member) => {
            info!("Faculty member {} ({}) created", member.id, member.full_name_en);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                member,
                "Faculty member created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create faculty member", e)),
    }
}
