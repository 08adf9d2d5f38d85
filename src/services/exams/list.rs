use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::ApiResponse;
use crate::models::exams::requests::{ExamListParams, ExamListQuery};
use crate::models::exams::responses::ExamListResponse;
use crate::services::internal_error;
use crate::utils::normalize_search;

pub async fn list_exams(
    service: &ExamService,
    request: &HttpRequest,
    params: ExamListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let query = ExamListQuery {
        department: normalize_search(params.dept.as_deref()),
        year: params.year,
        search: normalize_search(params.q.as_deref()),
        order: params.order.unwrap_or_default(),
    };

    let items = match storage.list_exams(query).await {
        Ok(items) => items,
        Err(e) => return Ok(internal_error("Failed to list exams", e)),
    };
    let departments = match storage.list_department_summaries().await {
        Ok(departments) => departments,
        Err(e) => return Ok(internal_error("Failed to list departments", e)),
    };
    let years = match storage.list_exam_years().await {
        Ok(years) => years,
        Err(e) => return Ok(internal_error("Failed to list exam years", e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ExamListResponse {
            items,
            departments,
            years,
        },
        "Exams retrieved successfully",
    )))
}
