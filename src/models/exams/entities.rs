use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::departments::entities::DepartmentSummary;

// 考试方式
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub enum ExamMode {
    #[default]
    InPerson,
    Online,
    Hybrid,
}

impl ExamMode {
    pub const IN_PERSON: &'static str = "in_person";
    pub const ONLINE: &'static str = "online";
    pub const HYBRID: &'static str = "hybrid";
}

impl<'de> Deserialize<'de> for ExamMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的考试方式: '{s}'. 支持: in_person, online, hybrid"
            ))
        })
    }
}

impl std::fmt::Display for ExamMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamMode::InPerson => write!(f, "{}", ExamMode::IN_PERSON),
            ExamMode::Online => write!(f, "{}", ExamMode::ONLINE),
            ExamMode::Hybrid => write!(f, "{}", ExamMode::HYBRID),
        }
    }
}

impl std::str::FromStr for ExamMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ExamMode::IN_PERSON => Ok(ExamMode::InPerson),
            ExamMode::ONLINE => Ok(ExamMode::Online),
            ExamMode::HYBRID => Ok(ExamMode::Hybrid),
            _ => Err(format!("Invalid exam mode: {s}")),
        }
    }
}

// 考试安排
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Exam {
    pub id: i64,
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
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub exam: Exam,
    pub department: Option<DepartmentSummary>,
}
