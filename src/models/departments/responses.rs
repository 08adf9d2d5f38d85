use serde::Serialize;
use ts_rs::TS;

use super::entities::Department;

// 列表行：附带引用计数
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct DepartmentListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub department: Department,
    pub faculty_count: u64,
    pub exam_count: u64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct DepartmentListResponse {
    pub items: Vec<DepartmentListItem>,
    pub query: Option<String>,
}

/// 删除结果
#[derive(Debug)]
pub enum DepartmentDeleteOutcome {
    Deleted(Department),
    NotFound,
    InUse { faculty: u64, exams: u64 },
}
