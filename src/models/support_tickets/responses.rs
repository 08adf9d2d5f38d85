use serde::Serialize;
use ts_rs::TS;

use super::entities::SupportTicket;
use crate::models::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/support.ts")]
pub struct SupportTicketListResponse {
    pub items: Vec<SupportTicket>,
    pub pagination: PaginationInfo,
    pub query: Option<String>,
}

// 公开提交后的回执
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/support.ts")]
pub struct SupportTicketCreatedResponse {
    pub id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 回复结果：邮件失败不影响已保存的回复
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/support.ts")]
pub struct ReplyResponse {
    pub ticket: SupportTicket,
    pub email_sent: bool,
    pub email_error: Option<String>,
}
