use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use super::session::Session;
use crate::models::auth::requests::LoginRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;
use crate::utils::password::verify_password;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 1. 根据登录名获取用户
    let user = match storage.get_user_by_username(login_request.username.trim()).await {
        Ok(user) => user,
        Err(e) => return Ok(internal_error("Login failed", e)),
    };

    // 2. 验证密码，仅第三方登录的账号没有本地密码
    let user = match user {
        Some(user)
            if user
                .password_hash
                .as_deref()
                .is_some_and(|hash| verify_password(&login_request.password, hash)) =>
        {
            user
        }
        _ => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "Invalid username or password.",
            )));
        }
    };

    // 3. 签发令牌
    let username = user.username.clone();
    match Session::establish(user, login_request.remember_me) {
        Ok(session) => {
            tracing::info!("User {} logged in successfully", username);
            Ok(session.respond(HttpResponse::Ok(), "Login successful"))
        }
        Err(e) => Ok(internal_error("Login failed, unable to generate token", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserRequest;
    use crate::services::test_support::{body_json, memory_storage, request_with};
    use crate::utils::jwt::{REFRESH_COOKIE, SESSION_COOKIE};
    use actix_web::http::StatusCode;

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            remember_me: false,
        }
    }

    #[actix_web::test]
    async fn test_login_sets_session_cookies() {
        let storage = memory_storage().await;
        storage
            .create_user(CreateUserRequest {
                username: "0791234567".to_string(),
                full_name: Some("Lina Haddad".to_string()),
                password_hash: Some(crate::utils::password::hash_password("secret").unwrap()),
                role: UserRole::User,
                provider: None,
                provider_key: None,
            })
            .await
            .unwrap();
        let request = request_with(&storage);
        let service = AuthService::new_lazy();

        let resp = handle_login(&service, login(" 0791234567 ", "secret"), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let names: Vec<String> = resp.cookies().map(|c| c.name().to_string()).collect();
        assert!(names.contains(&SESSION_COOKIE.to_string()));
        assert!(names.contains(&REFRESH_COOKIE.to_string()));
        let body = body_json(resp).await;
        assert_eq!(body["data"]["user"]["username"], "0791234567");
        assert!(body["data"]["user"].get("password_hash").is_none());

        let resp = handle_login(&service, login("0791234567", "wrong"), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_external_only_account_cannot_log_in_locally() {
        let storage = memory_storage().await;
        storage
            .create_user(CreateUserRequest {
                username: "ahmad@example.com".to_string(),
                full_name: None,
                password_hash: None,
                role: UserRole::User,
                provider: Some(crate::models::users::entities::ExternalProvider::Google),
                provider_key: Some("google-123".to_string()),
            })
            .await
            .unwrap();
        let request = request_with(&storage);

        let resp = handle_login(
            &AuthService::new_lazy(),
            login("ahmad@example.com", ""),
            &request,
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Invalid username or password.");
    }
}
