use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::departments::entities::DepartmentSummary;

// 学术通知
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/alert.ts")]
pub struct AcademicAlert {
    pub id: i64,
    pub title_ar: String,
    pub title_en: String,
    pub location: Option<String>,
    pub date: Option<chrono::DateTime<chrono::Utc>>,
    pub is_important: bool,
    pub department_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/alert.ts")]
pub struct AlertDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub alert: AcademicAlert,
    pub department: Option<DepartmentSummary>,
}
