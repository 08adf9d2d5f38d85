/*!
 * 会话认证中间件
 *
 * 令牌来源依次为 `Authorization: Bearer <JWT>` 请求头和 `session` cookie。
 * 验证通过后从缓存（或数据库）加载用户，写入请求扩展供处理程序读取：
 *
 * ```rust,ignore
 * web::scope("/api/v1/dashboard")
 *     .wrap(RequireRole::new_any(UserRole::admin_roles()))
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(dashboard));
 *
 * async fn handler(req: HttpRequest) -> Result<HttpResponse> {
 *     let user = RequireJWT::extract_user_claims(&req);
 *     // ...
 * }
 * ```
 *
 * 令牌无效、缺失或用户已被删除时返回 401。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{self, UserRole};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info, warn};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireJWT;

/// 用户缓存键
pub fn user_cache_key(token: &str) -> String {
    format!("user:{token}")
}

// 提取并验证访问令牌，返回当前用户
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<entities::User, String> {
    let token = JwtUtils::extract_access_token(req.request())
        .ok_or_else(|| "Missing session or Authorization header".to_string())?;

    let claims = JwtUtils::verify_access_token(&token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid or expired token".to_string()
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());
    let key = user_cache_key(&token);

    if let Some(cache) = &cache {
        match cache.get_raw(&key).await {
            CacheResult::Found(json) => match serde_json::from_str::<entities::User>(&json) {
                Ok(user) => return Ok(user),
                Err(_) => {
                    cache.remove(&key).await;
                    debug!("Dropped unreadable cached user entry");
                }
            },
            _ => debug!("User not cached for token, loading from storage"),
        }
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.get_ref().clone())
        .ok_or_else(|| {
            warn!("Storage not registered in app data");
            "Authentication unavailable".to_string()
        })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| "Invalid user ID in token".to_string())?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            warn!("Failed to load user {}: {}", user_id, e);
            "Failed to retrieve user".to_string()
        })?
        .ok_or_else(|| "User no longer exists".to_string())?;

    if let Some(cache) = &cache
        && let Ok(user_json) = serde_json::to_string(&user)
    {
        cache
            .insert_raw(key, user_json, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            // 验证 JWT token
            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 当前用户，仅在 RequireJWT 之后可用
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<entities::User> {
        req.extensions().get::<entities::User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<entities::User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions()
            .get::<entities::User>()
            .map(|user| user.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::{App, HttpRequest, HttpResponse, test};

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match RequireJWT::extract_user_id(&req) {
            Some(id) => HttpResponse::Ok().body(id.to_string()),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    async fn setup() -> (Arc<dyn Storage>, Arc<dyn ObjectCache>, entities::User) {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let storage: Arc<dyn Storage> = Arc::new(storage);
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
        let user = storage
            .create_user(CreateUserRequest {
                username: "0791234567".to_string(),
                full_name: None,
                password_hash: None,
                role: UserRole::Admin,
                provider: None,
                provider_key: None,
            })
            .await
            .unwrap();
        (storage, cache, user)
    }

    #[actix_web::test]
    async fn test_missing_token_is_rejected() {
        let (storage, cache, _) = setup().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .service(web::scope("/me").wrap(RequireJWT).route("", web::get().to(whoami))),
        )
        .await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_bearer_and_cookie_tokens_accepted() {
        let (storage, cache, user) = setup().await;
        let token = JwtUtils::generate_access_token(&user).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(cache))
                .service(web::scope("/me").wrap(RequireJWT).route("", web::get().to(whoami))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, user.id.to_string());

        let req = test::TestRequest::get()
            .uri("/me")
            .cookie(JwtUtils::create_session_cookie(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_deleted_user_is_rejected() {
        let (storage, cache, user) = setup().await;
        let token = JwtUtils::generate_access_token(&user).unwrap();
        storage.delete_user(user.id).await.unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .service(web::scope("/me").wrap(RequireJWT).route("", web::get().to(whoami))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
