use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn get_department(
    service: &DepartmentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_department_by_id(id).await {
        Ok(Some(department)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            department,
            "Department retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "Department not found",
        ))),
        Err(e) => Ok(internal_error("Failed to get department", e)),
    }
}
