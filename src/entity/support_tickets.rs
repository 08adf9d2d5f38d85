//! 支持工单实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "support_tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    pub university_id: Option<String>,
    pub email: String,
    pub course_exam: Option<String>,
    pub issue_type: i32,
    pub description: String,
    pub screenshot_path: Option<String>,
    pub admin_reply: Option<String>,
    pub created_at: i64,
    pub replied_at: Option<i64>,
    pub is_resolved: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_ticket(self) -> crate::models::support_tickets::entities::SupportTicket {
        use crate::models::support_tickets::entities::{SupportIssueType, SupportTicket};

        SupportTicket {
            id: self.id,
            full_name: self.full_name,
            university_id: self.university_id,
            email: self.email,
            course_exam: self.course_exam,
            issue_type: SupportIssueType::from_code(self.issue_type),
            description: self.description,
            screenshot_path: self.screenshot_path,
            admin_reply: self.admin_reply,
            created_at: super::to_datetime(self.created_at),
            replied_at: self.replied_at.map(super::to_datetime),
            is_resolved: self.is_resolved,
        }
    }
}
