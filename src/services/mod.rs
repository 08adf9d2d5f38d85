pub mod alerts;
pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod exam_archive;
pub mod exams;
pub mod faculty;
pub mod media;
pub mod news;
pub mod study_plans;
pub mod support;

pub use alerts::AlertService;
pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use departments::DepartmentService;
pub use exam_archive::ExamArchiveService;
pub use exams::ExamService;
pub use faculty::FacultyService;
pub use media::MediaService;
pub use news::NewsService;
pub use study_plans::StudyPlanService;
pub use support::SupportService;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::models::{ApiResponse, ErrorCode, FieldError};
use crate::storage::Storage;
use crate::utils::upload::{StoredFile, UploadKind, UploadTarget, read_multipart};

/// 从 app data 取存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|storage| storage.get_ref().clone())
        .ok_or_else(|| {
            tracing::error!("Storage not found in app data");
            actix_web::error::ErrorInternalServerError("Storage not available")
        })
}

/// 422：逐字段错误
pub(crate) fn validation_response(errors: Vec<FieldError>) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ApiResponse::validation(errors))
}

pub(crate) fn field_error(field: &str, message: &str) -> Vec<FieldError> {
    vec![FieldError {
        field: field.to_string(),
        message: message.to_string(),
    }]
}

pub(crate) fn internal_error(context: &str, error: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("{}: {}", context, error);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {error}"),
    ))
}

/// 读取只含一个文件的 multipart 请求，没有文件时返回 400
pub(crate) async fn receive_upload(
    payload: Multipart,
    kind: UploadKind,
) -> Result<StoredFile, HttpResponse> {
    let form = read_multipart(payload, &UploadTarget::from_config(kind))
        .await
        .map_err(|e| e.into_response())?;

    form.file.ok_or_else(|| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileUploadFailed,
            "No file was uploaded",
        ))
    })
}
