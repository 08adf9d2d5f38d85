use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::ApiResponse;
use crate::models::departments::requests::DepartmentListParams;
use crate::models::departments::responses::DepartmentListResponse;
use crate::services::internal_error;
use crate::utils::normalize_search;

pub async fn list_departments(
    service: &DepartmentService,
    request: &HttpRequest,
    params: DepartmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let query = normalize_search(params.q.as_deref());

    match storage.list_departments(query.clone()).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            DepartmentListResponse { items, query },
            "Departments retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list departments", e)),
    }
}
