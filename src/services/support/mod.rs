//! 支持工单：公开提交与管理端处理
//!
//! 回复工单时先保存回复，再向提交人发送一封通知邮件；邮件失败只体现在响应中。

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod reply;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::mail::EmailSender;
use crate::models::support_tickets::requests::{ReplyRequest, TicketListParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct SupportService {
    storage: Option<Arc<dyn Storage>>,
}

impl SupportService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn get_mailer(&self, request: &HttpRequest) -> Option<Arc<dyn EmailSender>> {
        request
            .app_data::<web::Data<Arc<dyn EmailSender>>>()
            .map(|mailer| mailer.get_ref().clone())
    }

    // 公开表单提交
    pub async fn create_ticket(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::create_ticket(self, request, payload).await
    }

    pub async fn list_tickets(
        &self,
        request: &HttpRequest,
        params: TicketListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_tickets(self, request, params).await
    }

    pub async fn get_ticket(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_ticket(self, request, id).await
    }

    pub async fn delete_ticket(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_ticket(self, request, id).await
    }

    pub async fn reply_ticket(
        &self,
        request: &HttpRequest,
        id: i64,
        reply: ReplyRequest,
    ) -> ActixResult<HttpResponse> {
        reply::reply_ticket(self, request, id, reply).await
    }
}

pub(super) fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::SupportTicketNotFound,
        "Support ticket not found",
    ))
}
