use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FacultyService;
use crate::models::ApiResponse;
use crate::models::faculty::requests::{FacultyListParams, FacultyListQuery};
use crate::models::faculty::responses::FacultyListResponse;
use crate::services::internal_error;
use crate::utils::normalize_search;

pub async fn list_faculty(
    service: &FacultyService,
    request: &HttpRequest,
    params: FacultyListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (page, size) = params.pagination.normalized();
    let selected_department = normalize_search(params.dep.as_deref());
    let query = normalize_search(params.q.as_deref());

    let result = match storage
        .list_faculty(FacultyListQuery {
            department: selected_department.clone(),
            search: query.clone(),
            page,
            size,
        })
        .await
    {
        Ok(result) => result,
        Err(e) => return Ok(internal_error("Failed to list faculty members", e)),
    };

    let departments = match storage.list_department_summaries().await {
        Ok(departments) => departments,
        Err(e) => return Ok(internal_error("Failed to list departments", e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        FacultyListResponse {
            items: result.items,
            pagination: result.pagination,
            departments,
            selected_department,
            query,
        },
        "Faculty members retrieved successfully",
    )))
}
