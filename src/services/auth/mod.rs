pub mod account;
pub mod external;
pub mod login;
pub mod logout;
pub mod oauth;
pub mod register;
pub mod session;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::middlewares::require_jwt::user_cache_key;
use crate::models::auth::requests::{
    ExternalCallbackQuery, ExternalLoginQuery, LoginRequest, RegisterRequest,
};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    /// 删除当前令牌对应的用户缓存
    pub(crate) async fn forget_cached_session(&self, request: &HttpRequest) {
        let Some(token) = JwtUtils::extract_access_token(request) else {
            return;
        };
        if let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
            cache.remove(&user_cache_key(&token)).await;
        }
    }

    // 登录验证
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 本地注册
    pub async fn register(
        &self,
        register_request: RegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, register_request, request).await
    }

    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(self, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    // 获取当前用户
    pub async fn get_user(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_get_user(self, request).await
    }

    // 注销账号
    pub async fn delete_account(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        account::handle_delete_account(self, request).await
    }

    pub async fn external_providers(&self) -> ActixResult<HttpResponse> {
        external::handle_list_providers(self).await
    }

    pub async fn external_login(
        &self,
        provider: String,
        query: ExternalLoginQuery,
    ) -> ActixResult<HttpResponse> {
        external::handle_external_login(self, provider, query).await
    }

    pub async fn external_callback(
        &self,
        request: &HttpRequest,
        provider: String,
        query: ExternalCallbackQuery,
    ) -> ActixResult<HttpResponse> {
        external::handle_external_callback(self, request, provider, query).await
    }
}
