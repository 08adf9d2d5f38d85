pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::departments::requests::{DepartmentListParams, DepartmentRequest};
use crate::storage::Storage;

pub struct DepartmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl DepartmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_departments(
        &self,
        request: &HttpRequest,
        params: DepartmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_departments(self, request, params).await
    }

    pub async fn get_department(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_department(self, request, id).await
    }

    pub async fn create_department(
        &self,
        request: &HttpRequest,
        department: DepartmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_department(self, request, department).await
    }

    pub async fn update_department(
        &self,
        request: &HttpRequest,
        id: i64,
        department: DepartmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_department(self, request, id, department).await
    }

    pub async fn delete_department(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_department(self, request, id).await
    }

    // 上传系图片，替换并删除旧图
    pub async fn upload_image(
        &self,
        request: &HttpRequest,
        id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_department_image(self, request, id, payload).await
    }
}
