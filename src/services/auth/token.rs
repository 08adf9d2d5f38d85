use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use super::session::clear_session_cookies;
use crate::middlewares::RequireJWT;
use crate::models::auth::responses::{RefreshTokenResponse, UserInfoResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;
use crate::utils::jwt::JwtUtils;

fn session_expired(message: &str) -> HttpResponse {
    clear_session_cookies(&mut HttpResponse::Unauthorized())
        .json(ApiResponse::error_empty(ErrorCode::Unauthorized, message))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Refresh token not found",
        )));
    };

    let claims = match JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            return Ok(session_expired("Refresh token is invalid or expired"));
        }
    };

    let storage = service.get_storage(request)?;
    // 令牌签发后账号可能已被删除
    let user = match claims.user_id() {
        Some(id) => match storage.get_user_by_id(id).await {
            Ok(user) => user,
            Err(e) => return Ok(internal_error("Token refresh failed", e)),
        },
        None => None,
    };
    let Some(user) = user else {
        return Ok(session_expired("User no longer exists"));
    };

    match JwtUtils::generate_access_token(&user) {
        Ok(access_token) => Ok(HttpResponse::Ok()
            .cookie(JwtUtils::create_session_cookie(&access_token))
            .json(ApiResponse::success(
                RefreshTokenResponse {
                    access_token,
                    expires_in: JwtUtils::access_token_lifetime().num_seconds(),
                },
                "Token refreshed",
            ))),
        Err(e) => Ok(internal_error("Token refresh failed", e)),
    }
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user_claims(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "Current user",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Not signed in",
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserRequest;
    use crate::services::test_support::{body_json, memory_storage};
    use crate::utils::jwt::{REFRESH_COOKIE, SESSION_COOKIE};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use actix_web::web;

    #[actix_web::test]
    async fn test_refresh_issues_new_session_cookie() {
        let storage = memory_storage().await;
        let user = storage
            .create_user(CreateUserRequest {
                username: "0791234567".to_string(),
                full_name: None,
                password_hash: None,
                role: UserRole::User,
                provider: None,
                provider_key: None,
            })
            .await
            .unwrap();
        let pair = JwtUtils::generate_token_pair(&user, true).unwrap();

        let request = TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .cookie(Cookie::new(REFRESH_COOKIE, pair.refresh_token.clone()))
            .to_http_request();
        let resp = handle_refresh_token(&AuthService::new_lazy(), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.cookies().any(|c| c.name() == SESSION_COOKIE && !c.value().is_empty()));
        let body = body_json(resp).await;
        let token = body["data"]["access_token"].as_str().unwrap().to_string();
        assert!(JwtUtils::verify_access_token(&token).is_ok());

        // 账号删除后刷新失败
        storage.delete_user(user.id).await.unwrap();
        let request = TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .cookie(Cookie::new(REFRESH_COOKIE, pair.refresh_token))
            .to_http_request();
        let resp = handle_refresh_token(&AuthService::new_lazy(), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_access_token_cannot_refresh() {
        let storage = memory_storage().await;
        let user = storage
            .create_user(CreateUserRequest {
                username: "0797654321".to_string(),
                full_name: None,
                password_hash: None,
                role: UserRole::User,
                provider: None,
                provider_key: None,
            })
            .await
            .unwrap();
        let access = JwtUtils::generate_access_token(&user).unwrap();
        let request = TestRequest::default()
            .app_data(web::Data::new(storage))
            .cookie(Cookie::new(REFRESH_COOKIE, access))
            .to_http_request();

        let resp = handle_refresh_token(&AuthService::new_lazy(), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
