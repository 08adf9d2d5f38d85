//! 第三方 OAuth 2.0 授权码流程
//!
//! 只使用各平台的授权、换取令牌、读取资料三个端点。`state` 随机生成，
//! 连同提供方与回跳地址签名后放入短期 cookie，回调时核对。

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use once_cell::sync::Lazy;
use rand::Rng;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::config::{AppConfig, OAuthClientConfig};
use crate::errors::{MutaError, Result};
use crate::models::users::entities::ExternalProvider;

pub const STATE_COOKIE: &str = "external_login";
pub const STATE_LIFETIME_MINUTES: i64 = 10;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("muta-engineering")
        .timeout(Duration::from_secs(15))
        .build()
        .unwrap_or_else(|_| Client::new())
});

struct Endpoints {
    authorize: &'static str,
    token: &'static str,
    profile: &'static str,
    scope: &'static str,
}

fn endpoints(provider: ExternalProvider) -> Endpoints {
    match provider {
        ExternalProvider::Google => Endpoints {
            authorize: "https://accounts.google.com/o/oauth2/v2/auth",
            token: "https://oauth2.googleapis.com/token",
            profile: "https://openidconnect.googleapis.com/v1/userinfo",
            scope: "openid email profile",
        },
        ExternalProvider::Github => Endpoints {
            authorize: "https://github.com/login/oauth/authorize",
            token: "https://github.com/login/oauth/access_token",
            profile: "https://api.github.com/user",
            scope: "read:user user:email",
        },
        ExternalProvider::Facebook => Endpoints {
            authorize: "https://www.facebook.com/v19.0/dialog/oauth",
            token: "https://graph.facebook.com/v19.0/oauth/access_token",
            profile: "https://graph.facebook.com/me?fields=id,name,email",
            scope: "email",
        },
    }
}

pub fn client_config(provider: ExternalProvider) -> &'static OAuthClientConfig {
    let oauth = &AppConfig::get().oauth;
    match provider {
        ExternalProvider::Google => &oauth.google,
        ExternalProvider::Github => &oauth.github,
        ExternalProvider::Facebook => &oauth.facebook,
    }
}

pub fn is_enabled(provider: ExternalProvider) -> bool {
    client_config(provider).is_enabled()
}

pub fn redirect_uri(provider: ExternalProvider) -> String {
    format!(
        "{}/api/v1/auth/external/{}/callback",
        AppConfig::get().oauth.public_base_url.trim_end_matches('/'),
        provider.as_str()
    )
}

pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(rand::distr::Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

pub fn authorize_url(
    provider: ExternalProvider,
    client_id: &str,
    redirect_uri: &str,
    state: &str,
) -> Result<Url> {
    let endpoints = endpoints(provider);
    Url::parse_with_params(
        endpoints.authorize,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", endpoints.scope),
            ("state", state),
        ],
    )
    .map_err(|e| MutaError::external_provider(format!("Invalid authorize URL: {e}")))
}

/// 登录流程中暂存于 cookie 的数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingLogin {
    pub provider: String,
    pub state: String,
    pub return_url: String,
    exp: usize,
}

impl PendingLogin {
    pub fn new(provider: ExternalProvider, state: String, return_url: String) -> Self {
        let exp = chrono::Utc::now() + chrono::Duration::minutes(STATE_LIFETIME_MINUTES);
        Self {
            provider: provider.as_str().to_string(),
            state,
            return_url,
            exp: exp.timestamp() as usize,
        }
    }

    pub fn seal(&self) -> Result<String> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(AppConfig::get().jwt.secret.as_ref()),
        )
        .map_err(|e| MutaError::authentication(e.to_string()))
    }

    pub fn open(sealed: &str) -> Result<Self> {
        decode::<Self>(
            sealed,
            &DecodingKey::from_secret(AppConfig::get().jwt.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| MutaError::authentication(e.to_string()))
    }

    /// 回调的提供方与 state 必须与发起时一致
    pub fn matches(&self, provider: ExternalProvider, state: &str) -> bool {
        self.provider == provider.as_str() && !state.is_empty() && self.state == state
    }
}

/// 第三方资料中用得到的部分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProfile {
    pub subject: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn parse_profile(value: &Value) -> ExternalProfile {
    ExternalProfile {
        // Google 用 sub，GitHub 与 Facebook 用 id（GitHub 为数字）
        subject: non_empty(value.get("sub")).or_else(|| non_empty(value.get("id"))),
        email: non_empty(value.get("email")),
        name: non_empty(value.get("name")).or_else(|| non_empty(value.get("login"))),
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

async fn exchange_code(provider: ExternalProvider, code: &str) -> Result<String> {
    let client = client_config(provider);
    let redirect_uri = redirect_uri(provider);
    let response: TokenResponse = HTTP_CLIENT
        .post(endpoints(provider).token)
        .header(reqwest::header::ACCEPT, "application/json")
        .form(&[
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await?
        .json()
        .await?;

    match response.access_token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(MutaError::external_provider(format!(
            "{} did not return an access token: {}",
            provider.display_name(),
            response
                .error_description
                .or(response.error)
                .unwrap_or_else(|| "unknown error".to_string())
        ))),
    }
}

async fn fetch_profile(provider: ExternalProvider, access_token: &str) -> Result<ExternalProfile> {
    let value: Value = HTTP_CLIENT
        .get(endpoints(provider).profile)
        .bearer_auth(access_token)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(parse_profile(&value))
}

/// 用授权码换取用户资料
pub async fn complete_login(provider: ExternalProvider, code: &str) -> Result<ExternalProfile> {
    let access_token = exchange_code(provider, code).await?;
    fetch_profile(provider, &access_token).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_profile_per_provider() {
        let google = parse_profile(&json!({
            "sub": "1097", "email": "lina@example.com", "name": "Lina Haddad"
        }));
        assert_eq!(google.subject.as_deref(), Some("1097"));
        assert_eq!(google.email.as_deref(), Some("lina@example.com"));

        let github = parse_profile(&json!({
            "id": 5521, "login": "omar-k", "name": null, "email": null
        }));
        assert_eq!(github.subject.as_deref(), Some("5521"));
        assert_eq!(github.email, None);
        assert_eq!(github.name.as_deref(), Some("omar-k"));

        let empty = parse_profile(&json!({ "email": "  " }));
        assert_eq!(empty.subject, None);
        assert_eq!(empty.email, None);
    }

    #[test]
    fn test_authorize_url_carries_state_and_redirect() {
        let url = authorize_url(
            ExternalProvider::Github,
            "client-1",
            "http://localhost:8080/api/v1/auth/external/github/callback",
            "abc123",
        )
        .unwrap();
        assert_eq!(url.host_str(), Some("github.com"));
        let params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(params.contains(&("state".to_string(), "abc123".to_string())));
        assert!(params.contains(&("client_id".to_string(), "client-1".to_string())));
        assert!(params.contains(&("response_type".to_string(), "code".to_string())));
    }

    #[test]
    fn test_pending_login_round_trip_and_match() {
        let pending = PendingLogin::new(
            ExternalProvider::Google,
            generate_state(),
            "/exams".to_string(),
        );
        assert_eq!(pending.state.len(), 32);

        let opened = PendingLogin::open(&pending.seal().unwrap()).unwrap();
        assert_eq!(opened, pending);
        assert!(opened.matches(ExternalProvider::Google, &pending.state));
        assert!(!opened.matches(ExternalProvider::Github, &pending.state));
        assert!(!opened.matches(ExternalProvider::Google, "other"));
        assert!(PendingLogin::open("not-a-token").is_err());
    }
}
