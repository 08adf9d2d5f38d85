//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod alerts;
mod dashboard;
mod departments;
mod exam_archive;
mod exams;
mod faculty;
mod news;
mod support_tickets;
mod users;

use crate::config::AppConfig;
use crate::errors::{MutaError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| MutaError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| MutaError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| MutaError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| MutaError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(MutaError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 测试用内存数据库，单连接保证所有查询看到同一个库
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(|e| MutaError::database_connection(format!("无法连接到数据库: {e}")))?;
        Migrator::up(&db, None)
            .await
            .map_err(|e| MutaError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }
}

/// 写操作错误：唯一约束与外键冲突转为 Conflict
pub(crate) fn map_write_err(context: &str, e: DbErr) -> MutaError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            MutaError::conflict(format!("{context}失败，记录已存在: {detail}"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            MutaError::conflict(format!("{context}失败，存在关联记录: {detail}"))
        }
        _ => MutaError::database_operation(format!("{context}失败: {e}")),
    }
}

/// 读操作错误
pub(crate) fn map_read_err(context: &str, e: DbErr) -> MutaError {
    MutaError::database_operation(format!("{context}失败: {e}"))
}

// Storage trait 实现
use crate::models::{
    PaginatedResponse,
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
    exam_archive::{
        entities::ExamArchiveItem,
        requests::{ArchiveFileKind, ExamArchiveRequest},
    },
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
};
use crate::storage::{ContentTable, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_external_login(
        &self,
        provider: ExternalProvider,
        provider_key: &str,
    ) -> Result<Option<User>> {
        self.get_user_by_external_login_impl(provider, provider_key)
            .await
    }

    async fn link_external_login(
        &self,
        user_id: i64,
        provider: ExternalProvider,
        provider_key: &str,
    ) -> Result<Option<User>> {
        self.link_external_login_impl(user_id, provider, provider_key)
            .await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    // 系模块
    async fn list_departments(&self, search: Option<String>) -> Result<Vec<DepartmentListItem>> {
        self.list_departments_impl(search).await
    }

    async fn list_department_summaries(&self) -> Result<Vec<DepartmentSummary>> {
        self.list_department_summaries_impl().await
    }

    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn find_department_by_code(
        &self,
        code: &str,
        exclude_id: Option<i64>,
    ) -> Result<Option<Department>> {
        self.find_department_by_code_impl(code, exclude_id).await
    }

    async fn create_department(&self, req: DepartmentRequest) -> Result<Department> {
        self.create_department_impl(req).await
    }

    async fn update_department(&self, id: i64, req: DepartmentRequest) -> Result<Option<Department>> {
        self.update_department_impl(id, req).await
    }

    async fn update_department_image(
        &self,
        id: i64,
        image_path: &str,
    ) -> Result<Option<(Department, Option<String>)>> {
        self.update_department_image_impl(id, image_path).await
    }

    async fn delete_department(&self, id: i64) -> Result<DepartmentDeleteOutcome> {
        self.delete_department_impl(id).await
    }

    // 教师模块
    async fn list_faculty(
        &self,
        query: FacultyListQuery,
    ) -> Result<PaginatedResponse<FacultyMemberDetail>> {
        self.list_faculty_impl(query).await
    }

    async fn get_faculty_member(&self, id: i64) -> Result<Option<FacultyMemberDetail>> {
        self.get_faculty_member_impl(id).await
    }

    async fn create_faculty_member(&self, input: FacultyMemberInput) -> Result<FacultyMember> {
        self.create_faculty_member_impl(input).await
    }

    async fn update_faculty_member(
        &self,
        id: i64,
        input: FacultyMemberInput,
    ) -> Result<Option<FacultyMember>> {
        self.update_faculty_member_impl(id, input).await
    }

    async fn update_faculty_photo(
        &self,
        id: i64,
        photo_path: &str,
    ) -> Result<Option<(FacultyMember, Option<String>)>> {
        self.update_faculty_photo_impl(id, photo_path).await
    }

    async fn delete_faculty_member(&self, id: i64) -> Result<Option<FacultyMember>> {
        self.delete_faculty_member_impl(id).await
    }

    // 考试模块
    async fn list_exams(&self, query: ExamListQuery) -> Result<Vec<ExamDetail>> {
        self.list_exams_impl(query).await
    }

    async fn list_exam_years(&self) -> Result<Vec<i32>> {
        self.list_exam_years_impl().await
    }

    async fn get_exam_by_id(&self, id: i64) -> Result<Option<ExamDetail>> {
        self.get_exam_by_id_impl(id).await
    }

    async fn get_exam_by_business_id(&self, business_id: &str) -> Result<Option<ExamDetail>> {
        self.get_exam_by_business_id_impl(business_id).await
    }

    async fn create_exam(&self, input: ExamInput) -> Result<Exam> {
        self.create_exam_impl(input).await
    }

    async fn update_exam(&self, id: i64, input: ExamInput) -> Result<Option<Exam>> {
        self.update_exam_impl(id, input).await
    }

    async fn delete_exam(&self, id: i64) -> Result<bool> {
        self.delete_exam_impl(id).await
    }

    // 往年试题模块
    async fn list_archive_items(&self, search: Option<String>) -> Result<Vec<ExamArchiveItem>> {
        self.list_archive_items_impl(search).await
    }

    async fn get_archive_item(&self, id: i64) -> Result<Option<ExamArchiveItem>> {
        self.get_archive_item_impl(id).await
    }

    async fn create_archive_item(&self, req: ExamArchiveRequest) -> Result<ExamArchiveItem> {
        self.create_archive_item_impl(req).await
    }

    async fn update_archive_item(
        &self,
        id: i64,
        req: ExamArchiveRequest,
    ) -> Result<Option<(ExamArchiveItem, Option<String>)>> {
        self.update_archive_item_impl(id, req).await
    }

    async fn set_archive_file(
        &self,
        id: i64,
        kind: ArchiveFileKind,
        url: &str,
    ) -> Result<Option<(ExamArchiveItem, Option<String>)>> {
        self.set_archive_file_impl(id, kind, url).await
    }

    async fn delete_archive_item(&self, id: i64) -> Result<Option<ExamArchiveItem>> {
        self.delete_archive_item_impl(id).await
    }

    // 学术通知模块
    async fn list_alerts(&self, query: AlertListQuery) -> Result<Vec<AlertDetail>> {
        self.list_alerts_impl(query).await
    }

    async fn latest_alerts(&self, limit: u64) -> Result<Vec<AlertDetail>> {
        self.latest_alerts_impl(limit).await
    }

    async fn get_alert(&self, id: i64) -> Result<Option<AlertDetail>> {
        self.get_alert_impl(id).await
    }

    async fn create_alert(&self, input: AlertInput) -> Result<AcademicAlert> {
        self.create_alert_impl(input).await
    }

    async fn update_alert(&self, id: i64, input: AlertInput) -> Result<Option<AcademicAlert>> {
        self.update_alert_impl(id, input).await
    }

    async fn delete_alert(&self, id: i64) -> Result<bool> {
        self.delete_alert_impl(id).await
    }

    // 新闻模块
    async fn list_news(&self, query: NewsListQuery) -> Result<Vec<NewsItem>> {
        self.list_news_impl(query).await
    }

    async fn get_news_item(&self, id: i64) -> Result<Option<NewsItem>> {
        self.get_news_item_impl(id).await
    }

    async fn create_news_item(&self, input: NewsItemInput) -> Result<NewsItem> {
        self.create_news_item_impl(input).await
    }

    async fn update_news_item(&self, id: i64, input: NewsItemInput) -> Result<Option<NewsItem>> {
        self.update_news_item_impl(id, input).await
    }

    async fn update_news_image(
        &self,
        id: i64,
        image_path: &str,
    ) -> Result<Option<(NewsItem, Option<String>)>> {
        self.update_news_image_impl(id, image_path).await
    }

    async fn delete_news_item(&self, id: i64) -> Result<Option<NewsItem>> {
        self.delete_news_item_impl(id).await
    }

    // 支持工单模块
    async fn create_support_ticket(
        &self,
        form: SupportTicketForm,
        screenshot_path: Option<String>,
    ) -> Result<SupportTicket> {
        self.create_support_ticket_impl(form, screenshot_path).await
    }

    async fn list_support_tickets(
        &self,
        query: TicketListQuery,
    ) -> Result<SupportTicketListResponse> {
        self.list_support_tickets_impl(query).await
    }

    async fn get_support_ticket(&self, id: i64) -> Result<Option<SupportTicket>> {
        self.get_support_ticket_impl(id).await
    }

    async fn reply_support_ticket(
        &self,
        id: i64,
        reply: &str,
        mark_resolved: bool,
    ) -> Result<Option<SupportTicket>> {
        self.reply_support_ticket_impl(id, reply, mark_resolved)
            .await
    }

    async fn delete_support_ticket(&self, id: i64) -> Result<Option<SupportTicket>> {
        self.delete_support_ticket_impl(id).await
    }

    // 仪表盘
    async fn dashboard_counts(&self) -> Result<DashboardCounts> {
        self.dashboard_counts_impl().await
    }

    async fn recent_news_activities(&self, limit: u64) -> Result<Vec<RecentActivity>> {
        self.recent_news_activities_impl(limit).await
    }

    async fn recent_exam_activities(&self, limit: u64) -> Result<Vec<RecentActivity>> {
        self.recent_exam_activities_impl(limit).await
    }

    async fn is_table_empty(&self, table: ContentTable) -> Result<bool> {
        self.is_table_empty_impl(table).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("muta.db").unwrap(),
            "sqlite://muta.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/muta").unwrap(),
            "postgres://u:p@localhost/muta"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }
}
