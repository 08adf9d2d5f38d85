use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 往年试题
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam_archive.ts")]
pub struct ExamArchiveItem {
    pub id: i64,
    pub course_code: String,
    pub course_name_ar: String,
    pub course_name_en: String,
    /// 例如 "Fall 2024"
    pub term: Option<String>,
    pub pdf_url: Option<String>,
    pub solution_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
