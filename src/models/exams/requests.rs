use serde::Deserialize;
use ts_rs::TS;

use super::entities::ExamMode;
use crate::models::FieldError;
use crate::models::common::validation::{
    FieldErrors, fallback_if_blank, normalize_optional, normalize_required,
};
use crate::models::faculty::requests::SELECT_DEPARTMENT;

// 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

// 列表查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListParams {
    /// 系代码、阿语名或英语名
    pub dept: Option<String>,
    pub year: Option<i32>,
    pub q: Option<String>,
    pub order: Option<SortOrder>,
}

// 存储层查询
#[derive(Debug, Clone, Default)]
pub struct ExamListQuery {
    pub department: Option<String>,
    pub year: Option<i32>,
    pub search: Option<String>,
    pub order: SortOrder,
}

// 创建与编辑共用
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamRequest {
    /// 为空时：创建生成新值，编辑保留原值
    pub business_id: Option<String>,
    pub course_code: String,
    pub course_name_ar: Option<String>,
    pub course_name_en: String,
    pub year: i32,
    pub date_time: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub mode: ExamMode,
    pub location: Option<String>,
    pub lms_url: Option<String>,
    pub lms_how_to: Option<String>,
    pub instructions: Option<String>,
    #[serde(default)]
    pub has_stego_protection: bool,
    #[serde(default)]
    pub department_id: i64,
}

/// 规范化后的考试数据，business_id 已确定
#[derive(Debug, Clone)]
pub struct ExamInput {
    pub business_id: String,
    pub course_code: String,
    pub course_name_ar: String,
    pub course_name_en: String,
    pub year: i32,
    pub date_time: chrono::DateTime<chrono::Utc>,
    pub mode: ExamMode,
    pub location: Option<String>,
    pub lms_url: Option<String>,
    pub lms_how_to: Option<String>,
    pub instructions: Option<String>,
    pub has_stego_protection: bool,
    pub department_id: i64,
}

/// 32 位十六进制的新业务编号
pub fn generate_business_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

impl ExamRequest {
    /// 创建：未提供 business_id 时生成
    pub fn normalize_for_create(self) -> ExamInput {
        let business_id =
            normalize_optional(self.business_id.clone()).unwrap_or_else(generate_business_id);
        self.into_input(business_id)
    }

    /// 编辑：未提供 business_id 时保留原值
    pub fn normalize_for_update(self, existing_business_id: &str) -> ExamInput {
        let business_id = normalize_optional(self.business_id.clone())
            .unwrap_or_else(|| existing_business_id.to_string());
        self.into_input(business_id)
    }

    fn into_input(self, business_id: String) -> ExamInput {
        let course_name_en = normalize_required(self.course_name_en);
        ExamInput {
            business_id,
            course_code: normalize_required(self.course_code),
            course_name_ar: fallback_if_blank(self.course_name_ar, &course_name_en),
            course_name_en,
            year: self.year,
            date_time: self.date_time,
            mode: self.mode,
            location: normalize_optional(self.location),
            lms_url: normalize_optional(self.lms_url),
            lms_how_to: normalize_optional(self.lms_how_to),
            instructions: normalize_optional(self.instructions),
            has_stego_protection: self.has_stego_protection,
            department_id: self.department_id,
        }
    }
}

impl ExamInput {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        errors
            .required_max("business_id", &self.business_id, 50)
            .required_max("course_code", &self.course_code, 20)
            .required_max("course_name_en", &self.course_name_en, 200)
            .max_len("course_name_ar", &self.course_name_ar, 200)
            .max_len_opt("location", self.location.as_deref(), 120)
            .max_len_opt("lms_url", self.lms_url.as_deref(), 500)
            .max_len_opt("lms_how_to", self.lms_how_to.as_deref(), 500)
            .max_len_opt("instructions", self.instructions.as_deref(), 1200);
        if self.department_id <= 0 {
            errors.add("department_id", SELECT_DEPARTMENT);
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(business_id: Option<&str>) -> ExamRequest {
        ExamRequest {
            business_id: business_id.map(str::to_string),
            course_code: " CE201 ".into(),
            course_name_ar: Some("".into()),
            course_name_en: "Statics".into(),
            year: 2,
            date_time: chrono::Utc::now(),
            mode: ExamMode::Online,
            location: None,
            lms_url: Some(" https://lms.mutah.edu.jo/course/201 ".into()),
            lms_how_to: None,
            instructions: None,
            has_stego_protection: true,
            department_id: 1,
        }
    }

    #[test]
    fn test_create_generates_business_id_when_blank() {
        let input = request(Some("   ")).normalize_for_create();
        assert_eq!(input.business_id.len(), 32);
        assert!(input.business_id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(input.course_name_ar, "Statics");
        assert_eq!(input.course_code, "CE201");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_update_keeps_existing_business_id_when_blank() {
        let input = request(None).normalize_for_update("EXAM-2024-001");
        assert_eq!(input.business_id, "EXAM-2024-001");

        let input = request(Some(" EXAM-NEW ")).normalize_for_update("EXAM-2024-001");
        assert_eq!(input.business_id, "EXAM-NEW");
    }

    #[test]
    fn test_validate_department_and_code() {
        let mut req = request(None);
        req.department_id = 0;
        req.course_code = "  ".into();
        let fields: Vec<_> = req
            .normalize_for_create()
            .validate()
            .unwrap_err()
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["course_code", "department_id"]);
    }

    #[test]
    fn test_mode_defaults_to_in_person() {
        let req: ExamRequest = serde_json::from_value(serde_json::json!({
            "course_code": "EE101",
            "course_name_en": "Circuits",
            "year": 1,
            "date_time": "2025-01-10T09:00:00Z",
            "department_id": 2
        }))
        .unwrap();
        assert_eq!(req.mode, ExamMode::InPerson);
        assert!(!req.has_stego_protection);
    }
}
