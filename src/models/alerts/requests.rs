use serde::Deserialize;
use ts_rs::TS;

use crate::models::FieldError;
use crate::models::common::validation::{
    FieldErrors, fallback_if_blank, normalize_optional, normalize_required,
};

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/alert.ts")]
pub struct AlertListParams {
    pub dep_id: Option<i64>,
    pub q: Option<String>,
    /// 缺省为 true：只返回无日期或日期不早于昨天的通知
    pub upcoming_only: Option<bool>,
}

// 存储层查询
#[derive(Debug, Clone, Default)]
pub struct AlertListQuery {
    pub department_id: Option<i64>,
    pub search: Option<String>,
    pub not_before: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct LatestAlertsParams {
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/alert.ts")]
pub struct AlertRequest {
    pub title_ar: Option<String>,
    pub title_en: String,
    pub location: Option<String>,
    pub date: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub is_important: bool,
    /// 0 或缺省表示不关联系
    pub department_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct AlertInput {
    pub title_ar: String,
    pub title_en: String,
    pub location: Option<String>,
    pub date: Option<chrono::DateTime<chrono::Utc>>,
    pub is_important: bool,
    pub department_id: Option<i64>,
}

impl AlertRequest {
    pub fn normalize(self) -> AlertInput {
        let title_en = normalize_required(self.title_en);
        AlertInput {
            title_ar: fallback_if_blank(self.title_ar, &title_en),
            title_en,
            location: normalize_optional(self.location),
            date: self.date,
            is_important: self.is_important,
            department_id: self.department_id.filter(|id| *id > 0),
        }
    }
}

impl AlertInput {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        errors
            .required_max("title_en", &self.title_en, 300)
            .max_len("title_ar", &self.title_ar, 300)
            .max_len_opt("location", self.location.as_deref(), 150);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_fallback_and_department_zero() {
        let input = AlertRequest {
            title_ar: None,
            title_en: "Midterm schedule published".into(),
            location: Some("  Hall A ".into()),
            date: None,
            is_important: true,
            department_id: Some(0),
        }
        .normalize();

        assert_eq!(input.title_ar, "Midterm schedule published");
        assert_eq!(input.location.as_deref(), Some("Hall A"));
        assert_eq!(input.department_id, None);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_title_length_limit() {
        let input = AlertRequest {
            title_ar: Some("ا".repeat(301)),
            title_en: "ok".into(),
            location: None,
            date: None,
            is_important: false,
            department_id: None,
        }
        .normalize();
        assert_eq!(input.validate().unwrap_err()[0].field, "title_ar");
    }
}
