use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use super::session::clear_session_cookies;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

/// 删除当前账号并结束会话
pub async fn handle_delete_account(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Not signed in",
        )));
    };

    let storage = service.get_storage(request)?;
    match storage.delete_user(user_id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => return Ok(internal_error("Account deletion failed", e)),
    }

    service.forget_cached_session(request).await;
    tracing::info!("User {} deleted their account", user_id);

    Ok(clear_session_cookies(&mut HttpResponse::Ok())
        .json(ApiResponse::success_empty("Your account has been deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserRequest;
    use crate::services::test_support::{memory_storage, request_with};
    use actix_web::HttpMessage;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_delete_account_removes_user() {
        let storage = memory_storage().await;
        let user = storage
            .create_user(CreateUserRequest {
                username: "0791112223".to_string(),
                full_name: None,
                password_hash: None,
                role: UserRole::User,
                provider: None,
                provider_key: None,
            })
            .await
            .unwrap();
        let request = request_with(&storage);
        request.extensions_mut().insert(user.clone());

        let resp = handle_delete_account(&AuthService::new_lazy(), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(storage.get_user_by_id(user.id).await.unwrap().is_none());

        let resp = handle_delete_account(&AuthService::new_lazy(), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
