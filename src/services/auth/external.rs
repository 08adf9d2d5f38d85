use actix_web::cookie::{SameSite, time::Duration as CookieDuration};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AuthService;
use super::oauth::{self, ExternalProfile, PendingLogin, STATE_COOKIE, STATE_LIFETIME_MINUTES};
use super::session::Session;
use crate::errors::{MutaError, Result};
use crate::models::auth::requests::{ExternalCallbackQuery, ExternalLoginQuery};
use crate::models::auth::responses::{ExternalProviderInfo, ExternalProvidersResponse};
use crate::models::users::entities::{ExternalProvider, User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::validate::sanitize_return_url;

/// 解析并检查路由中的提供方
fn resolve_provider(name: &str) -> std::result::Result<ExternalProvider, HttpResponse> {
    let provider: ExternalProvider = name.parse().map_err(|_| {
        HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            format!("Unknown login provider: {name}"),
        ))
    })?;

    if !oauth::is_enabled(provider) {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ExternalProviderDisabled,
            format!("{} login is not enabled", provider.display_name()),
        )));
    }
    Ok(provider)
}

fn state_cookie(value: String, max_age: CookieDuration) -> actix_web::cookie::Cookie<'static> {
    JwtUtils::build_cookie(STATE_COOKIE, value, max_age, SameSite::Lax)
}

fn login_failed(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Unauthorized()
        .cookie(state_cookie(String::new(), CookieDuration::seconds(0)))
        .json(ApiResponse::error_empty(ErrorCode::ExternalLoginFailed, message))
}

pub async fn handle_list_providers(_service: &AuthService) -> ActixResult<HttpResponse> {
    let providers = ExternalProvider::ALL
        .into_iter()
        .filter(|provider| oauth::is_enabled(*provider))
        .map(|provider| ExternalProviderInfo {
            name: provider.as_str().to_string(),
            display_name: provider.display_name().to_string(),
            login_url: format!("/api/v1/auth/external/{}", provider.as_str()),
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ExternalProvidersResponse { providers },
        "External login providers",
    )))
}

pub async fn handle_external_login(
    _service: &AuthService,
    provider: String,
    query: ExternalLoginQuery,
) -> ActixResult<HttpResponse> {
    let provider = match resolve_provider(&provider) {
        Ok(provider) => provider,
        Err(resp) => return Ok(resp),
    };

    let pending = PendingLogin::new(
        provider,
        oauth::generate_state(),
        sanitize_return_url(query.return_url.as_deref()),
    );
    let sealed = match pending.seal() {
        Ok(sealed) => sealed,
        Err(e) => return Ok(internal_error("Unable to start external login", e)),
    };
    let location = match oauth::authorize_url(
        provider,
        &oauth::client_config(provider).client_id,
        &oauth::redirect_uri(provider),
        &pending.state,
    ) {
        Ok(url) => url,
        Err(e) => return Ok(internal_error("Unable to start external login", e)),
    };

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_string()))
        .cookie(state_cookie(
            sealed,
            CookieDuration::minutes(STATE_LIFETIME_MINUTES),
        ))
        .finish())
}

pub async fn handle_external_callback(
    service: &AuthService,
    request: &HttpRequest,
    provider: String,
    query: ExternalCallbackQuery,
) -> ActixResult<HttpResponse> {
    let provider = match resolve_provider(&provider) {
        Ok(provider) => provider,
        Err(resp) => return Ok(resp),
    };

    if let Some(error) = query.error {
        tracing::info!("{} login was cancelled: {}", provider, error);
        return Ok(login_failed(format!(
            "{} login was cancelled",
            provider.display_name()
        )));
    }

    // 核对 state
    let pending = request
        .cookie(STATE_COOKIE)
        .and_then(|cookie| PendingLogin::open(cookie.value()).ok());
    let state = query.state.unwrap_or_default();
    let Some(pending) = pending.filter(|p| p.matches(provider, &state)) else {
        tracing::warn!("{} login state mismatch", provider);
        return Ok(login_failed("Login session expired. Please try again."));
    };

    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Missing authorization code",
        )));
    };

    let profile = match oauth::complete_login(provider, &code).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("{} login failed: {}", provider, e);
            return Ok(login_failed(format!(
                "Could not sign in with {}",
                provider.display_name()
            )));
        }
    };

    let storage = service.get_storage(request)?;
    let user = match resolve_external_user(&storage, provider, profile).await {
        Ok(user) => user,
        Err(e) => return Ok(internal_error("External login failed", e)),
    };

    tracing::info!("User {} signed in with {}", user.username, provider);
    match Session::establish(user, false) {
        Ok(session) => Ok(session.redirect(
            &pending.return_url,
            state_cookie(String::new(), CookieDuration::seconds(0)),
        )),
        Err(e) => Ok(internal_error("External login failed, unable to generate token", e)),
    }
}

/// 查找顺序：第三方身份 → 同名账号（绑定）→ 新建
pub async fn resolve_external_user(
    storage: &Arc<dyn Storage>,
    provider: ExternalProvider,
    profile: ExternalProfile,
) -> Result<User> {
    let provider_key = profile
        .subject
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let username = profile.email.unwrap_or_else(|| provider_key.clone());

    if let Some(user) = storage
        .get_user_by_external_login(provider, &provider_key)
        .await?
    {
        return Ok(user);
    }

    if let Some(existing) = storage.get_user_by_username(&username).await? {
        return storage
            .link_external_login(existing.id, provider, &provider_key)
            .await?
            .ok_or_else(|| MutaError::not_found(format!("User {} disappeared", existing.id)));
    }

    storage
        .create_user(CreateUserRequest {
            username,
            full_name: profile.name,
            password_hash: None,
            role: UserRole::User,
            provider: Some(provider),
            provider_key: Some(provider_key),
        })
        .await
}
