use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ExamService, business_id_in_use_response, check_input};
use crate::errors::MutaError;
use crate::models::ApiResponse;
use crate::models::exams::requests::ExamRequest;
use crate::services::internal_error;

pub async fn create_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam: ExamRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let input = exam.normalize_for_create();
    if let Err(response) = check_input(&storage, &input, None).await {
        return Ok(response);
    }

    match storage.create_exam(input).await {
        Ok(exam) => {
            info!(
                "Exam {} ({} {}) created",
                exam.id, exam.course_code, exam.business_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                exam,
                "Exam created successfully",
            )))
        }
        Err(MutaError::Conflict(_)) => Ok(business_id_in_use_response()),
        Err(e) => Ok(internal_error("Failed to create exam", e)),
    }
}
