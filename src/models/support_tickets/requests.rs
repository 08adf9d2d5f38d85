use serde::Deserialize;
use std::collections::HashMap;
use ts_rs::TS;

use super::entities::SupportIssueType;
use crate::models::FieldError;
use crate::models::common::validation::{FieldErrors, normalize_optional};

/// 公开表单提交的字段（multipart 文本部分）
#[derive(Debug, Clone, Default)]
pub struct SupportTicketForm {
    pub full_name: String,
    pub university_id: Option<String>,
    pub email: String,
    pub course_exam: Option<String>,
    pub issue_type: SupportIssueType,
    pub description: String,
}

impl SupportTicketForm {
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let text = |name: &str| fields.get(name).map(|v| v.trim().to_string());
        Self {
            full_name: text("full_name").unwrap_or_default(),
            university_id: normalize_optional(text("university_id")),
            email: text("email").unwrap_or_default(),
            course_exam: normalize_optional(text("course_exam")),
            issue_type: fields
                .get("issue_type")
                .map(|v| SupportIssueType::parse_lenient(v))
                .unwrap_or_default(),
            description: text("description").unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        errors
            .required_max("full_name", &self.full_name, 200)
            .max_len_opt("university_id", self.university_id.as_deref(), 50)
            .required_max("email", &self.email, 320);
        if !errors.has("email") {
            errors.email_opt("email", Some(&self.email));
        }
        errors
            .max_len_opt("course_exam", self.course_exam.as_deref(), 200)
            .required_max("description", &self.description, 2000);
        errors.into_result()
    }
}

// 管理端列表参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/support.ts")]
pub struct TicketListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub q: Option<String>,
}

// 存储层查询，分页已规范化
#[derive(Debug, Clone)]
pub struct TicketListQuery {
    pub page: u64,
    pub page_size: u64,
    pub search: Option<String>,
}

// 管理员回复
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/support.ts")]
pub struct ReplyRequest {
    pub reply: String,
    #[serde(default = "default_mark_resolved")]
    pub mark_resolved: bool,
}

fn default_mark_resolved() -> bool {
    true
}

impl ReplyRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        errors.required_max("reply", &self.reply, 4000);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_form_from_fields() {
        let form = SupportTicketForm::from_fields(&fields(&[
            ("full_name", " Ahmad Saleh "),
            ("email", "ahmad@mutah.edu.jo"),
            ("university_id", "  "),
            ("issue_type", "7"),
            ("description", "The exam link returns 404."),
        ]));
        assert_eq!(form.full_name, "Ahmad Saleh");
        assert_eq!(form.university_id, None);
        assert_eq!(form.issue_type, SupportIssueType::Other);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_form_validation_errors() {
        let form = SupportTicketForm::from_fields(&fields(&[("email", "broken")]));
        let fields: Vec<_> = form
            .validate()
            .unwrap_err()
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["full_name", "email", "description"]);
    }

    #[test]
    fn test_reply_defaults_to_resolving() {
        let req: ReplyRequest =
            serde_json::from_value(serde_json::json!({"reply": "Fixed."})).unwrap();
        assert!(req.mark_resolved);
        let empty = ReplyRequest {
            reply: "  ".into(),
            mark_resolved: false,
        };
        assert!(empty.validate().is_err());
    }
}
