use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::departments::entities::DepartmentSummary;

// 教师
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/faculty.ts")]
pub struct FacultyMember {
    pub id: i64,
    pub full_name_ar: String,
    pub full_name_en: String,
    pub title_ar: Option<String>,
    pub title_en: Option<String>,
    pub email: Option<String>,
    pub office: Option<String>,
    pub photo_path: Option<String>,
    pub department_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 带所属系的教师
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/faculty.ts")]
pub struct FacultyMemberDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub member: FacultyMember,
    pub department: Option<DepartmentSummary>,
}
