use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::validation::{
    FieldErrors, fallback_if_blank, normalize_optional, normalize_required,
};
use crate::models::{FieldError, PaginationQuery};

pub const SELECT_DEPARTMENT: &str = "Select a department.";

// 列表查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/faculty.ts")]
pub struct FacultyListParams {
    /// 系代码、阿语名或英语名
    pub dep: Option<String>,
    pub q: Option<String>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

// 存储层查询
#[derive(Debug, Clone, Default)]
pub struct FacultyListQuery {
    pub department: Option<String>,
    pub search: Option<String>,
    pub page: u64,
    pub size: u64,
}

// 创建与编辑共用
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/faculty.ts")]
pub struct FacultyMemberRequest {
    pub full_name_ar: Option<String>,
    pub full_name_en: String,
    pub title_ar: Option<String>,
    pub title_en: Option<String>,
    pub email: Option<String>,
    pub office: Option<String>,
    #[serde(default)]
    pub department_id: i64,
}

/// 规范化后的请求，阿语姓名已回退
#[derive(Debug, Clone)]
pub struct FacultyMemberInput {
    pub full_name_ar: String,
    pub full_name_en: String,
    pub title_ar: Option<String>,
    pub title_en: Option<String>,
    pub email: Option<String>,
    pub office: Option<String>,
    pub department_id: i64,
}

impl FacultyMemberRequest {
    pub fn normalize(self) -> FacultyMemberInput {
        let full_name_en = normalize_required(self.full_name_en);
        FacultyMemberInput {
            full_name_ar: fallback_if_blank(self.full_name_ar, &full_name_en),
            full_name_en,
            title_ar: normalize_optional(self.title_ar),
            title_en: normalize_optional(self.title_en),
            email: normalize_optional(self.email),
            office: normalize_optional(self.office),
            department_id: self.department_id,
        }
    }
}

impl FacultyMemberInput {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        errors
            .required_max("full_name_en", &self.full_name_en, 200)
            .max_len("full_name_ar", &self.full_name_ar, 200)
            .max_len_opt("title_ar", self.title_ar.as_deref(), 120)
            .max_len_opt("title_en", self.title_en.as_deref(), 120)
            .max_len_opt("email", self.email.as_deref(), 320)
            .email_opt("email", self.email.as_deref())
            .max_len_opt("office", self.office.as_deref(), 100);
        if self.department_id <= 0 {
            errors.add("department_id", SELECT_DEPARTMENT);
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> FacultyMemberRequest {
        FacultyMemberRequest {
            full_name_ar: None,
            full_name_en: " Dr. Sami Khalil ".into(),
            title_ar: Some("".into()),
            title_en: Some("Associate Professor".into()),
            email: Some("s.khalil@mutah.edu.jo".into()),
            office: None,
            department_id: 3,
        }
    }

    #[test]
    fn test_arabic_name_falls_back_to_english() {
        let input = request().normalize();
        assert_eq!(input.full_name_ar, "Dr. Sami Khalil");
        assert_eq!(input.full_name_en, "Dr. Sami Khalil");
        assert_eq!(input.title_ar, None);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_department_must_be_selected() {
        let mut req = request();
        req.department_id = 0;
        let errors = req.normalize().validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "department_id");
        assert_eq!(errors[0].message, SELECT_DEPARTMENT);
    }

    #[test]
    fn test_invalid_email_is_reported() {
        let mut req = request();
        req.email = Some("not-an-email".into());
        let errors = req.normalize().validate().unwrap_err();
        assert_eq!(errors[0].field, "email");
    }
}
