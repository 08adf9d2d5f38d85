pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::news::requests::{NewsItemRequest, NewsListParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct NewsService {
    storage: Option<Arc<dyn Storage>>,
}

impl NewsService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_news(
        &self,
        request: &HttpRequest,
        params: NewsListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_news(self, request, params).await
    }

    pub async fn get_news_item(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_news_item(self, request, id).await
    }

    pub async fn create_news_item(
        &self,
        request: &HttpRequest,
        item: NewsItemRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_news_item(self, request, item).await
    }

    pub async fn update_news_item(
        &self,
        request: &HttpRequest,
        id: i64,
        item: NewsItemRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_news_item(self, request, id, item).await
    }

    pub async fn delete_news_item(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_news_item(self, request, id).await
    }

    pub async fn upload_image(
        &self,
        request: &HttpRequest,
        id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_news_image(self, request, id, payload).await
    }
}

pub(super) fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::NewsItemNotFound,
        "News item not found",
    ))
}
