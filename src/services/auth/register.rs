use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use super::session::Session;
use crate::errors::MutaError;
use crate::models::auth::requests::RegisterRequest;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode, FieldError};
use crate::services::{field_error, internal_error, validation_response};
use crate::utils::password::hash_password;

const PHONE_TAKEN: &str = "This phone number is already registered.";

fn phone_taken_response() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::<Vec<FieldError>>::error(
        ErrorCode::UsernameAlreadyExists,
        field_error("phone", PHONE_TAKEN),
        PHONE_TAKEN,
    ))
}

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let register_request = register_request.normalize();
    if let Err(errors) = register_request.validate() {
        return Ok(validation_response(errors));
    }

    match storage.get_user_by_username(&register_request.phone).await {
        Ok(Some(_)) => return Ok(phone_taken_response()),
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Registration failed", e)),
    }

    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Registration failed", e)),
    };

    let user = match storage
        .create_user(CreateUserRequest {
            username: register_request.phone,
            full_name: register_request.full_name,
            password_hash: Some(password_hash),
            role: UserRole::User,
            provider: None,
            provider_key: None,
        })
        .await
    {
        Ok(user) => user,
        // 并发注册同一手机号
        Err(MutaError::Conflict(_)) => return Ok(phone_taken_response()),
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                "Registration failed. Please try again later.",
            )));
        }
    };

    tracing::info!("User {} registered", user.username);
    match Session::establish(user, false) {
        Ok(session) => Ok(session.respond(HttpResponse::Created(), "Registration successful")),
        Err(e) => Ok(internal_error("Registration failed, unable to generate token", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{body_json, memory_storage, request_with};
    use crate::utils::jwt::SESSION_COOKIE;
    use actix_web::http::StatusCode;

    fn register(phone: &str) -> RegisterRequest {
        RegisterRequest {
            phone: phone.to_string(),
            full_name: Some(" Omar Khalil ".to_string()),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_register_signs_in_and_rejects_duplicates() {
        let storage = memory_storage().await;
        let request = request_with(&storage);
        let service = AuthService::new_lazy();

        let resp = handle_register(&service, register("0791234567"), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert!(resp.cookies().any(|c| c.name() == SESSION_COOKIE));
        let body = body_json(resp).await;
        assert_eq!(body["data"]["user"]["full_name"], "Omar Khalil");
        assert_eq!(body["data"]["user"]["role"], "user");

        let stored = storage
            .get_user_by_username("0791234567")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.has_local_password());

        let resp = handle_register(&service, register(" 0791234567 "), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(body["data"][0]["field"], "phone");
    }

    #[actix_web::test]
    async fn test_register_validation_errors() {
        let storage = memory_storage().await;
        let request = request_with(&storage);
        let mut bad = register("12");
        bad.confirm_password = "other1".to_string();

        let resp = handle_register(&AuthService::new_lazy(), bad, &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(storage.get_user_by_username("12").await.unwrap().is_none());
    }
}
