use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::DepartmentService;
use super::create::{code_in_use_response, ensure_code_available};
use crate::errors::MutaError;
use crate::models::departments::requests::DepartmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, validation_response};

pub async fn update_department(
    service: &DepartmentService,
    request: &HttpRequest,
    id: i64,
    department: DepartmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let department = department.normalize();
    if let Err(errors) = department.validate() {
        return Ok(validation_response(errors));
    }

    if let Err(response) =
        ensure_code_available(&storage, department.code.as_deref(), Some(id)).await
    {
        return Ok(response);
    }

    match storage.update_department(id, department).await {
        Ok(Some(department)) => {
            info!("Department {} updated", department.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                department,
                "Department updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "Department not found",
        ))),
        Err(MutaError::Conflict(_)) => Ok(code_in_use_response()),
        Err(e) => Ok(internal_error("Failed to update department", e)),
    }
}
