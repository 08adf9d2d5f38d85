use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{HttpResponse, HttpResponseBuilder};

use crate::models::ApiResponse;
use crate::models::auth::responses::LoginResponse;
use crate::models::users::entities::User;
use crate::utils::jwt::JwtUtils;

/// 新建立的会话：响应体与两枚 cookie
pub struct Session {
    pub body: LoginResponse,
    session_cookie: Cookie<'static>,
    refresh_cookie: Cookie<'static>,
}

impl Session {
    pub fn establish(user: User, remember_me: bool) -> Result<Self, jsonwebtoken::errors::Error> {
        let pair = JwtUtils::generate_token_pair(&user, remember_me)?;

        Ok(Self {
            session_cookie: JwtUtils::create_session_cookie(&pair.access_token),
            refresh_cookie: JwtUtils::create_refresh_token_cookie(
                &pair.refresh_token,
                JwtUtils::refresh_token_lifetime(remember_me),
            ),
            body: LoginResponse {
                access_token: pair.access_token,
                expires_in: JwtUtils::access_token_lifetime().num_seconds(),
                user,
                created_at: chrono::Utc::now(),
            },
        })
    }

    pub fn respond(self, mut builder: HttpResponseBuilder, message: &str) -> HttpResponse {
        builder
            .cookie(self.session_cookie)
            .cookie(self.refresh_cookie)
            .json(ApiResponse::success(self.body, message))
    }

    /// 第三方登录完成后跳回站内页面
    pub fn redirect(self, location: &str, extra: Cookie<'static>) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, location.to_string()))
            .cookie(self.session_cookie)
            .cookie(self.refresh_cookie)
            .cookie(extra)
            .finish()
    }
}

/// 清除浏览器中的会话 cookie
pub fn clear_session_cookies(builder: &mut HttpResponseBuilder) -> &mut HttpResponseBuilder {
    builder
        .cookie(JwtUtils::create_empty_session_cookie())
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
}
