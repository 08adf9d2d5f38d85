use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamArchiveService;
use crate::models::ApiResponse;
use crate::models::exam_archive::requests::ArchiveListParams;
use crate::models::exam_archive::responses::ArchiveListResponse;
use crate::services::internal_error;
use crate::utils::normalize_search;

pub async fn list_archive_items(
    service: &ExamArchiveService,
    request: &HttpRequest,
    params: ArchiveListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let query = normalize_search(params.q.as_deref());

    match storage.list_archive_items(query.clone()).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ArchiveListResponse { items, query },
            "Archive items retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list archive items", e)),
    }
}
