use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use super::session::clear_session_cookies;
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

pub async fn handle_logout(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    // 登出不要求有效会话，令牌仅用于日志
    if let Some(claims) = JwtUtils::extract_access_token(request)
        .and_then(|token| JwtUtils::verify_access_token(&token).ok())
    {
        tracing::info!("User {} logged out", claims.username);
    }
    service.forget_cached_session(request).await;

    Ok(clear_session_cookies(&mut HttpResponse::Ok())
        .json(ApiResponse::success_empty("Logged out")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::{REFRESH_COOKIE, SESSION_COOKIE};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_logout_expires_both_cookies() {
        let request = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "token"))
            .to_http_request();

        let resp = handle_logout(&AuthService::new_lazy(), &request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let cleared: Vec<(String, String)> = resp
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();
        assert!(cleared.contains(&(SESSION_COOKIE.to_string(), String::new())));
        assert!(cleared.contains(&(REFRESH_COOKIE.to_string(), String::new())));
    }
}
