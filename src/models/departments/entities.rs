use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 系/专业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct Department {
    pub id: i64,
    pub code: Option<String>,
    pub name_ar: String,
    pub name_en: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub image_path: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Department {
    pub fn summary(&self) -> DepartmentSummary {
        DepartmentSummary {
            id: self.id,
            code: self.code.clone(),
            name_ar: self.name_ar.clone(),
            name_en: self.name_en.clone(),
        }
    }
}

/// 下拉选项与列表行中嵌入的系信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct DepartmentSummary {
    pub id: i64,
    pub code: Option<String>,
    pub name_ar: String,
    pub name_en: String,
}
