use serde::Serialize;
use ts_rs::TS;

use super::entities::AlertDetail;
use crate::models::departments::entities::DepartmentSummary;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/alert.ts")]
pub struct AlertListResponse {
    pub items: Vec<AlertDetail>,
    pub departments: Vec<DepartmentSummary>,
}
