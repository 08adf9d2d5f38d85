use serde::Serialize;
use ts_rs::TS;

use super::entities::FacultyMemberDetail;
use crate::models::PaginationInfo;
use crate::models::departments::entities::DepartmentSummary;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/faculty.ts")]
pub struct FacultyListResponse {
    pub items: Vec<FacultyMemberDetail>,
    pub pagination: PaginationInfo,
    pub departments: Vec<DepartmentSummary>,
    pub selected_department: Option<String>,
    pub query: Option<String>,
}
