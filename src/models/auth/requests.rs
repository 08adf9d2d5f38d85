use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::validation::{FieldErrors, normalize_optional};
use crate::models::FieldError;
use crate::utils::validate::{validate_password, validate_phone};

// 用户登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// 手机号或邮箱
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

// 本地注册请求，登录名为手机号
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub phone: String,
    pub full_name: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterRequest {
    pub fn normalize(mut self) -> Self {
        self.phone = self.phone.trim().to_string();
        self.full_name = normalize_optional(self.full_name);
        self
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        errors.required("phone", &self.phone);
        if !errors.has("phone")
            && let Err(msg) = validate_phone(&self.phone)
        {
            errors.add("phone", msg);
        }
        errors.max_len_opt("full_name", self.full_name.as_deref(), 200);
        if let Err(msg) = validate_password(&self.password, &self.confirm_password) {
            let field = if self.password.chars().count()
                < crate::utils::validate::MIN_PASSWORD_LENGTH
            {
                "password"
            } else {
                "confirm_password"
            };
            errors.add(field, msg);
        }
        errors.into_result()
    }
}

// 第三方登录入口参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct ExternalLoginQuery {
    pub return_url: Option<String>,
}

// 第三方回调参数
#[derive(Debug, Deserialize)]
pub struct ExternalCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}
