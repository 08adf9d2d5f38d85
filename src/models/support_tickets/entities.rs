use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 问题类型，数值与前端表单一致
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/support.ts")]
pub enum SupportIssueType {
    #[default]
    CannotAccessExam,
    AccountProblem,
    ContentError,
    Other,
}

impl SupportIssueType {
    pub fn code(&self) -> i32 {
        match self {
            SupportIssueType::CannotAccessExam => 0,
            SupportIssueType::AccountProblem => 1,
            SupportIssueType::ContentError => 2,
            SupportIssueType::Other => 9,
        }
    }

    /// 未知数值归为 Other
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => SupportIssueType::CannotAccessExam,
            1 => SupportIssueType::AccountProblem,
            2 => SupportIssueType::ContentError,
            _ => SupportIssueType::Other,
        }
    }

    /// 接受数值或名称（snake_case 或 PascalCase），无法识别时为 Other
    pub fn parse_lenient(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(code) = raw.parse::<i32>() {
            return Self::from_code(code);
        }
        match raw.replace('_', "").to_ascii_lowercase().as_str() {
            "cannotaccessexam" => SupportIssueType::CannotAccessExam,
            "accountproblem" => SupportIssueType::AccountProblem,
            "contenterror" => SupportIssueType::ContentError,
            _ => SupportIssueType::Other,
        }
    }

    pub fn label_en(&self) -> &'static str {
        match self {
            SupportIssueType::CannotAccessExam => "Cannot access exam",
            SupportIssueType::AccountProblem => "Account problem",
            SupportIssueType::ContentError => "Content error",
            SupportIssueType::Other => "Other",
        }
    }

    pub fn label_ar(&self) -> &'static str {
        match self {
            SupportIssueType::CannotAccessExam => "تعذّر الدخول إلى الامتحان",
            SupportIssueType::AccountProblem => "مشكلة في الحساب",
            SupportIssueType::ContentError => "خطأ في المحتوى",
            SupportIssueType::Other => "أخرى",
        }
    }
}

impl<'de> Deserialize<'de> for SupportIssueType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(i64),
            Name(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Self::from_code(i32::try_from(code).unwrap_or(-1)),
            Raw::Name(name) => Self::parse_lenient(&name),
        })
    }
}

impl std::fmt::Display for SupportIssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label_en())
    }
}

// 支持工单
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/support.ts")]
pub struct SupportTicket {
    pub id: i64,
    pub full_name: String,
    pub university_id: Option<String>,
    pub email: String,
    pub course_exam: Option<String>,
    pub issue_type: SupportIssueType,
    pub description: String,
    pub screenshot_path: Option<String>,
    pub admin_reply: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub replied_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_resolved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_unknown_fallback() {
        assert_eq!(SupportIssueType::from_code(1), SupportIssueType::AccountProblem);
        assert_eq!(SupportIssueType::from_code(5), SupportIssueType::Other);
        assert_eq!(SupportIssueType::Other.code(), 9);
    }

    #[test]
    fn test_parse_lenient_accepts_numbers_and_names() {
        assert_eq!(SupportIssueType::parse_lenient(" 2 "), SupportIssueType::ContentError);
        assert_eq!(
            SupportIssueType::parse_lenient("account_problem"),
            SupportIssueType::AccountProblem
        );
        assert_eq!(
            SupportIssueType::parse_lenient("CannotAccessExam"),
            SupportIssueType::CannotAccessExam
        );
        assert_eq!(SupportIssueType::parse_lenient("printer on fire"), SupportIssueType::Other);
    }

    #[test]
    fn test_deserialize_from_json_number_or_string() {
        let t: SupportIssueType = serde_json::from_str("0").unwrap();
        assert_eq!(t, SupportIssueType::CannotAccessExam);
        let t: SupportIssueType = serde_json::from_str("\"content_error\"").unwrap();
        assert_eq!(t, SupportIssueType::ContentError);
        let t: SupportIssueType = serde_json::from_str("42").unwrap();
        assert_eq!(t, SupportIssueType::Other);
    }
}
