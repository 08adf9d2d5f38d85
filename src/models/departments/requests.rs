use serde::Deserialize;
use ts_rs::TS;

use crate::models::FieldError;
use crate::models::common::validation::{FieldErrors, normalize_optional, normalize_required};

// 列表查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct DepartmentListParams {
    pub q: Option<String>,
}

// 创建与编辑共用
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct DepartmentRequest {
    pub code: Option<String>,
    pub name_ar: String,
    pub name_en: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
}

impl DepartmentRequest {
    pub fn normalize(self) -> Self {
        Self {
            code: normalize_optional(self.code),
            name_ar: normalize_required(self.name_ar),
            name_en: normalize_required(self.name_en),
            description_ar: normalize_optional(self.description_ar),
            description_en: normalize_optional(self.description_en),
        }
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        errors
            .max_len_opt("code", self.code.as_deref(), 10)
            .required_max("name_ar", &self.name_ar, 200)
            .required_max("name_en", &self.name_en, 200)
            .max_len_opt("description_ar", self.description_ar.as_deref(), 1000)
            .max_len_opt("description_en", self.description_en.as_deref(), 1000);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_drops_blank_optionals() {
        let req = DepartmentRequest {
            code: Some(" civ ".into()),
            name_ar: " الهندسة المدنية ".into(),
            name_en: "Civil Engineering".into(),
            description_ar: Some("   ".into()),
            description_en: None,
        }
        .normalize();

        assert_eq!(req.code.as_deref(), Some("civ"));
        assert_eq!(req.name_ar, "الهندسة المدنية");
        assert_eq!(req.description_ar, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_limits() {
        let req = DepartmentRequest {
            code: Some("TOO-LONG-CODE".into()),
            name_ar: String::new(),
            name_en: "x".repeat(201),
            description_ar: None,
            description_en: None,
        };
        let fields: Vec<_> = req
            .validate()
            .unwrap_err()
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["code", "name_ar", "name_en"]);
    }
}
