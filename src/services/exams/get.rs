use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, not_found};
use crate::models::ApiResponse;
use crate::services::internal_error;

pub async fn get_exam(
    service: &ExamService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_exam_by_id(id).await {
        Ok(Some(exam)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            exam,
            "Exam retrieved successfully",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to get exam", e)),
    }
}

// 学生通过考试链接中的业务编号访问
pub async fn get_exam_by_business_id(
    service: &ExamService,
    request: &HttpRequest,
    business_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let business_id = business_id.trim();
    if business_id.is_empty() {
        return Ok(not_found());
    }

    match storage.get_exam_by_business_id(business_id).await {
        Ok(Some(exam)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            exam,
            "Exam retrieved successfully",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to get exam", e)),
    }
}
