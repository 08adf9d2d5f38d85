use serde::Serialize;
use ts_rs::TS;

use super::entities::ExamDetail;
use crate::models::departments::entities::DepartmentSummary;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListResponse {
    pub items: Vec<ExamDetail>,
    pub departments: Vec<DepartmentSummary>,
    /// 已有考试的学年，降序
    pub years: Vec<i32>,
}
