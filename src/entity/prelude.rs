//! 预导入模块，方便使用

pub use super::academic_alerts::{
    ActiveModel as AlertActiveModel, Entity as AcademicAlerts, Model as AlertModel,
};
pub use super::departments::{
    ActiveModel as DepartmentActiveModel, Entity as Departments, Model as DepartmentModel,
};
pub use super::exam_archive_items::{
    ActiveModel as ArchiveItemActiveModel, Entity as ExamArchiveItems, Model as ArchiveItemModel,
};
pub use super::exams::{ActiveModel as ExamActiveModel, Entity as Exams, Model as ExamModel};
pub use super::faculty_members::{
    ActiveModel as FacultyMemberActiveModel, Entity as FacultyMembers, Model as FacultyMemberModel,
};
pub use super::news_items::{
    ActiveModel as NewsItemActiveModel, Entity as NewsItems, Model as NewsItemModel,
};
pub use super::support_tickets::{
    ActiveModel as SupportTicketActiveModel, Entity as SupportTickets, Model as SupportTicketModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
