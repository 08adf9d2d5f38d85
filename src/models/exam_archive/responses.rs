use serde::Serialize;
use ts_rs::TS;

use super::entities::ExamArchiveItem;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam_archive.ts")]
pub struct ArchiveListResponse {
    pub items: Vec<ExamArchiveItem>,
    pub query: Option<String>,
}
