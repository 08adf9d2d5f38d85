use crate::config::AppConfig;
use crate::models::users::entities::User;
use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "session";
pub const REFRESH_COOKIE: &str = "refresh_token";

// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,          // 用户 ID
    pub username: String,     // 登录名（手机号或邮箱）
    pub display_name: String, // 姓名，缺省为登录名
    pub role: String,
    pub token_type: String, // "access" 或 "refresh"
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    /// access token 有效期，同时也是会话 cookie 的空闲时长
    pub fn access_token_lifetime() -> chrono::Duration {
        chrono::Duration::minutes(AppConfig::get().jwt.access_token_expiry)
    }

    pub fn refresh_token_lifetime(remember_me: bool) -> chrono::Duration {
        let jwt = &AppConfig::get().jwt;
        if remember_me {
            chrono::Duration::days(jwt.refresh_token_remember_me_expiry)
        } else {
            chrono::Duration::days(jwt.refresh_token_expiry)
        }
    }

    pub fn generate_access_token(user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        Self::generate_token_with_expiry(user, "access", Self::access_token_lifetime())
    }

    pub fn generate_refresh_token(
        user: &User,
        expiry: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::generate_token_with_expiry(user, "refresh", expiry)
    }

    pub fn generate_token_with_expiry(
        user: &User,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            display_name: user.display_name().to_string(),
            role: user.role.to_string(),
            token_type: token_type.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let secret = Self::get_secret();
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
    }

    pub fn generate_token_pair(
        user: &User,
        remember_me: bool,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(user)?,
            refresh_token: Self::generate_refresh_token(
                user,
                Self::refresh_token_lifetime(remember_me),
            )?,
        })
    }

    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let secret = Self::get_secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        decode::<Claims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
    }

    pub fn verify_token_type(
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = Self::verify_token(token)?;
        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(token, "access")
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(token, "refresh")
    }

    /// http-only cookie，生产环境附加 Secure
    pub fn build_cookie(
        name: &'static str,
        value: String,
        max_age: CookieDuration,
        same_site: SameSite,
    ) -> Cookie<'static> {
        Cookie::build(name, value)
            .path("/")
            .max_age(max_age)
            .same_site(same_site)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    pub fn create_session_cookie(access_token: &str) -> Cookie<'static> {
        Self::build_cookie(
            SESSION_COOKIE,
            access_token.to_string(),
            CookieDuration::seconds(Self::access_token_lifetime().num_seconds()),
            SameSite::Lax,
        )
    }

    pub fn create_refresh_token_cookie(
        refresh_token: &str,
        lifetime: chrono::Duration,
    ) -> Cookie<'static> {
        Self::build_cookie(
            REFRESH_COOKIE,
            refresh_token.to_string(),
            CookieDuration::seconds(lifetime.num_seconds()),
            SameSite::Strict,
        )
    }

    /// 注销时用于覆盖浏览器中的 cookie
    pub fn create_empty_session_cookie() -> Cookie<'static> {
        Self::build_cookie(
            SESSION_COOKIE,
            String::new(),
            CookieDuration::seconds(0),
            SameSite::Lax,
        )
    }

    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        Self::build_cookie(
            REFRESH_COOKIE,
            String::new(),
            CookieDuration::seconds(0),
            SameSite::Strict,
        )
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|v| !v.is_empty())
    }

    /// 先取 `Authorization: Bearer`，再取会话 cookie
    pub fn extract_access_token(req: &actix_web::HttpRequest) -> Option<String> {
        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        bearer.or_else(|| {
            req.cookie(SESSION_COOKIE)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use actix_web::test::TestRequest;

    fn sample_user() -> User {
        User {
            id: 7,
            username: "0791234567".to_string(),
            full_name: Some("Lina Haddad".to_string()),
            password_hash: None,
            role: UserRole::Admin,
            provider: None,
            provider_key: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_access_token_carries_identity() {
        let token = JwtUtils::generate_access_token(&sample_user()).unwrap();
        let claims = JwtUtils::verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.username, "0791234567");
        assert_eq!(claims.display_name, "Lina Haddad");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let pair = JwtUtils::generate_token_pair(&sample_user(), false).unwrap();
        assert!(JwtUtils::verify_access_token(&pair.refresh_token).is_err());
        assert!(JwtUtils::verify_refresh_token(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_bearer_header_wins_over_cookie() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer header-token"))
            .cookie(Cookie::new(SESSION_COOKIE, "cookie-token"))
            .to_http_request();
        assert_eq!(
            JwtUtils::extract_access_token(&req).as_deref(),
            Some("header-token")
        );

        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "cookie-token"))
            .to_http_request();
        assert_eq!(
            JwtUtils::extract_access_token(&req).as_deref(),
            Some("cookie-token")
        );

        assert!(JwtUtils::extract_access_token(&TestRequest::default().to_http_request()).is_none());
    }
}
