use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::{
    ExternalCallbackQuery, ExternalLoginQuery, LoginRequest, RegisterRequest,
};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

pub async fn register(
    req: HttpRequest,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(user_data.into_inner(), &req).await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn logout(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&request).await
}

pub async fn get_user(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_user(&request).await
}

pub async fn delete_account(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.delete_account(&request).await
}

pub async fn external_providers() -> ActixResult<HttpResponse> {
    AUTH_SERVICE.external_providers().await
}

pub async fn external_login(
    provider: web::Path<String>,
    query: web::Query<ExternalLoginQuery>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .external_login(provider.into_inner(), query.into_inner())
        .await
}

pub async fn external_callback(
    req: HttpRequest,
    provider: web::Path<String>,
    query: web::Query<ExternalCallbackQuery>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .external_callback(&req, provider.into_inner(), query.into_inner())
        .await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(
                web::resource("/login")
                    .wrap(middlewares::RateLimit::login())
                    .route(web::post().to(login)),
            )
            .service(
                web::resource("/register")
                    .wrap(middlewares::RateLimit::register())
                    .route(web::post().to(register)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(middlewares::RateLimit::refresh_token())
                    .route(web::post().to(refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(middlewares::RateLimit::new(10, 60).with_prefix("logout"))
                    .route(web::post().to(logout)),
            )
            .service(
                web::resource("/me")
                    .wrap(middlewares::RequireJWT)
                    .route(web::get().to(get_user))
                    .route(web::delete().to(delete_account)),
            )
            .route("/external", web::get().to(external_providers))
            .service(
                web::resource("/external/{provider}")
                    .wrap(middlewares::RateLimit::external_login())
                    .route(web::get().to(external_login)),
            )
            .route(
                "/external/{provider}/callback",
                web::get().to(external_callback),
            ),
    );
}
