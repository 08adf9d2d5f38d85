use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::validation::FieldError;
use crate::models::ErrorCode;

/// 所有 JSON 接口共用的响应信封
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    fn build(code: ErrorCode, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, Some(data), message)
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self::build(code, Some(data), message)
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, None, message)
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(code, None, message)
    }
}

impl ApiResponse<Vec<FieldError>> {
    /// 字段校验失败，data 为逐字段错误列表
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::build(
            ErrorCode::ValidationFailed,
            Some(errors),
            "One or more fields are invalid",
        )
    }
}
