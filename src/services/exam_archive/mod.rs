pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exam_archive::requests::{
    ArchiveFileKind, ArchiveListParams, ExamArchiveRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ExamArchiveService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamArchiveService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_items(
        &self,
        request: &HttpRequest,
        params: ArchiveListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_archive_items(self, request, params).await
    }

    pub async fn get_item(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_archive_item(self, request, id).await
    }

    pub async fn create_item(
        &self,
        request: &HttpRequest,
        item: ExamArchiveRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_archive_item(self, request, item).await
    }

    pub async fn update_item(
        &self,
        request: &HttpRequest,
        id: i64,
        item: ExamArchiveRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_archive_item(self, request, id, item).await
    }

    pub async fn delete_item(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_archive_item(self, request, id).await
    }

    // 上传试题或答案 PDF
    pub async fn upload_pdf(
        &self,
        request: &HttpRequest,
        id: i64,
        kind: ArchiveFileKind,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_archive_pdf(self, request, id, kind, payload).await
    }
}

pub(super) fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ArchiveItemNotFound,
        "Archive item not found",
    ))
}
