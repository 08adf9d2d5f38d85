use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ExamService, not_found};
use crate::models::ApiResponse;
use crate::services::internal_error;

pub async fn delete_exam(
    service: &ExamService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_exam(id).await {
        Ok(true) => {
            info!("Exam {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Exam deleted successfully")))
        }
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to delete exam", e)),
    }
}
