use std::sync::Arc;

use crate::models::{
    alerts::{
        entities::{AcademicAlert, AlertDetail},
        requests::{AlertInput, AlertListQuery},
    },
    dashboard::{DashboardCounts, RecentActivity},
    departments::{
        entities::{Department, DepartmentSummary},
        requests::DepartmentRequest,
        responses::{DepartmentDeleteOutcome, DepartmentListItem},
    },
    exam_archive::{entities::ExamArchiveItem, requests::ArchiveFileKind, requests::ExamArchiveRequest},
    exams::{
        entities::{Exam, ExamDetail},
        requests::{ExamInput, ExamListQuery},
    },
    faculty::{
        entities::{FacultyMember, FacultyMemberDetail},
        requests::{FacultyListQuery, FacultyMemberInput},
    },
    news::{
        entities::NewsItem,
        requests::{NewsItemInput, NewsListQuery},
    },
    support_tickets::{
        entities::SupportTicket,
        requests::{SupportTicketForm, TicketListQuery},
        responses::SupportTicketListResponse,
    },
    users::{
        entities::{ExternalProvider, User},
        requests::CreateUserRequest,
    },
    PaginatedResponse,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_external_login(
        &self,
        provider: ExternalProvider,
        provider_key: &str,
    ) -> Result<Option<User>>;
    // 为已有账号绑定第三方登录
    async fn link_external_login(
        &self,
        user_id: i64,
        provider: ExternalProvider,
        provider_key: &str,
    ) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;

    /// 系
    async fn list_departments(&self, search: Option<String>) -> Result<Vec<DepartmentListItem>>;
    // 下拉选项，按英文名排序
    async fn list_department_summaries(&self) -> Result<Vec<DepartmentSummary>>;
    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>>;
    // 代码比较忽略大小写，可排除自身
    async fn find_department_by_code(
        &self,
        code: &str,
        exclude_id: Option<i64>,
    ) -> Result<Option<Department>>;
    async fn create_department(&self, req: DepartmentRequest) -> Result<Department>;
    async fn update_department(&self, id: i64, req: DepartmentRequest) -> Result<Option<Department>>;
    // 返回更新前的图片路径，供删除旧文件
    async fn update_department_image(
        &self,
        id: i64,
        image_path: &str,
    ) -> Result<Option<(Department, Option<String>)>>;
    async fn delete_department(&self, id: i64) -> Result<DepartmentDeleteOutcome>;

    /// 教师
    async fn list_faculty(
        &self,
        query: FacultyListQuery,
    ) -> Result<PaginatedResponse<FacultyMemberDetail>>;
    async fn get_faculty_member(&self, id: i64) -> Result<Option<FacultyMemberDetail>>;
    async fn create_faculty_member(&self, input: FacultyMemberInput) -> Result<FacultyMember>;
    async fn update_faculty_member(
        &self,
        id: i64,
        input: FacultyMemberInput,
    ) -> Result<Option<FacultyMember>>;
    async fn update_faculty_photo(
        &self,
        id: i64,
        photo_path: &str,
    ) -> Result<Option<(FacultyMember, Option<String>)>>;
    async fn delete_faculty_member(&self, id: i64) -> Result<Option<FacultyMember>>;

    /// 考试
    async fn list_exams(&self, query: ExamListQuery) -> Result<Vec<ExamDetail>>;
    // 已有考试的学年，降序
    async fn list_exam_years(&self) -> Result<Vec<i32>>;
    async fn get_exam_by_id(&self, id: i64) -> Result<Option<ExamDetail>>;
    async fn get_exam_by_business_id(&self, business_id: &str) -> Result<Option<ExamDetail>>;
    async fn create_exam(&self, input: ExamInput) -> Result<Exam>;
    async fn update_exam(&self, id: i64, input: ExamInput) -> Result<Option<Exam>>;
    async fn delete_exam(&self, id: i64) -> Result<bool>;

    /// 往年试题
    async fn list_archive_items(&self, search: Option<String>) -> Result<Vec<ExamArchiveItem>>;
    async fn get_archive_item(&self, id: i64) -> Result<Option<ExamArchiveItem>>;
    async fn create_archive_item(&self, req: ExamArchiveRequest) -> Result<ExamArchiveItem>;
    // clear_solution 时一并返回被移除的答案路径
    async fn update_archive_item(
        &self,
        id: i64,
        req: ExamArchiveRequest,
    ) -> Result<Option<(ExamArchiveItem, Option<String>)>>;
    async fn set_archive_file(
        &self,
        id: i64,
        kind: ArchiveFileKind,
        url: &str,
    ) -> Result<Option<(ExamArchiveItem, Option<String>)>>;
    async fn delete_archive_item(&self, id: i64) -> Result<Option<ExamArchiveItem>>;

    /// 学术通知
    async fn list_alerts(&self, query: AlertListQuery) -> Result<Vec<AlertDetail>>;
    async fn latest_alerts(&self, limit: u64) -> Result<Vec<AlertDetail>>;
    async fn get_alert(&self, id: i64) -> Result<Option<AlertDetail>>;
    async fn create_alert(&self, input: AlertInput) -> Result<AcademicAlert>;
    async fn update_alert(&self, id: i64, input: AlertInput) -> Result<Option<AcademicAlert>>;
    async fn delete_alert(&self, id: i64) -> Result<bool>;

    /// 新闻
    async fn list_news(&self, query: NewsListQuery) -> Result<Vec<NewsItem>>;
    async fn get_news_item(&self, id: i64) -> Result<Option<NewsItem>>;
    async fn create_news_item(&self, input: NewsItemInput) -> Result<NewsItem>;
    async fn update_news_item(&self, id: i64, input: NewsItemInput) -> Result<Option<NewsItem>>;
    async fn update_news_image(
        &self,
        id: i64,
        image_path: &str,
    ) -> Result<Option<(NewsItem, Option<String>)>>;
    async fn delete_news_item(&self, id: i64) -> Result<Option<NewsItem>>;

    /// 支持工单
    async fn create_support_ticket(
        &self,
        form: SupportTicketForm,
        screenshot_path: Option<String>,
    ) -> Result<SupportTicket>;
    async fn list_support_tickets(&self, query: TicketListQuery)
    -> Result<SupportTicketListResponse>;
    async fn get_support_ticket(&self, id: i64) -> Result<Option<SupportTicket>>;
    // 保存回复并记录回复时间
    async fn reply_support_ticket(
        &self,
        id: i64,
        reply: &str,
        mark_resolved: bool,
    ) -> Result<Option<SupportTicket>>;
    async fn delete_support_ticket(&self, id: i64) -> Result<Option<SupportTicket>>;

    /// 仪表盘
    async fn dashboard_counts(&self) -> Result<DashboardCounts>;
    async fn recent_news_activities(&self, limit: u64) -> Result<Vec<RecentActivity>>;
    async fn recent_exam_activities(&self, limit: u64) -> Result<Vec<RecentActivity>>;

    /// 种子数据用：各内容表是否为空
    async fn is_table_empty(&self, table: ContentTable) -> Result<bool>;
}

/// 需要种子数据的内容表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTable {
    Departments,
    FacultyMembers,
    Exams,
    ExamArchiveItems,
    AcademicAlerts,
    NewsItems,
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
