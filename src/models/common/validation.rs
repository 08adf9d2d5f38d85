//! 字段级校验与输入规范化

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::validate::validate_email;

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// 校验错误收集器
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// 必填，空白视为未填
    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add(field, format!("The {field} field is required."));
        }
        self
    }

    /// 按字符数计算最大长度
    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.add(
                field,
                format!("The {field} field must be at most {max} characters."),
            );
        }
        self
    }

    pub fn max_len_opt(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if let Some(value) = value {
            self.max_len(field, value, max);
        }
        self
    }

    pub fn required_max(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        self.required(field, value).max_len(field, value, max)
    }

    pub fn email_opt(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value
            && validate_email(value).is_err()
        {
            self.add(field, "Enter a valid email address.");
        }
        self
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), Vec<FieldError>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}

/// 去除首尾空白，空串变为 None
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 去除首尾空白
pub fn normalize_required(value: String) -> String {
    value.trim().to_string()
}

/// 阿语字段为空时回退到英语字段
pub fn fallback_if_blank(primary: Option<String>, fallback: &str) -> String {
    match normalize_optional(primary) {
        Some(v) => v,
        None => fallback.trim().to_string(),
    }
}

pub fn fallback_if_blank_opt(primary: Option<String>, fallback: Option<&str>) -> Option<String> {
    normalize_optional(primary).or_else(|| fallback.map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_required_and_length_errors() {
        let mut errors = FieldErrors::new();
        errors
            .required_max("name_en", "  ", 10)
            .required_max("code", "ABCDEFGHIJK", 10)
            .max_len_opt("office", Some("B-12"), 100)
            .email_opt("email", Some("nope"));

        let errors = errors.into_result().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name_en", "code", "email"]);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut errors = FieldErrors::new();
        // 5 个阿拉伯字母，10 个字节
        errors.max_len("name_ar", "هندسة", 5);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_normalization_helpers() {
        assert_eq!(normalize_optional(Some("  x ".into())), Some("x".into()));
        assert_eq!(normalize_optional(Some("   ".into())), None);
        assert_eq!(fallback_if_blank(Some(" ".into()), " Civil "), "Civil");
        assert_eq!(fallback_if_blank(Some("مدني".into()), "Civil"), "مدني");
        assert_eq!(
            fallback_if_blank_opt(None, Some("Body")),
            Some("Body".to_string())
        );
    }
}
