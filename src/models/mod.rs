pub mod alerts;
pub mod auth;
pub mod common;
pub mod dashboard;
pub mod departments;
pub mod exam_archive;
pub mod exams;
pub mod faculty;
pub mod news;
pub mod study_plans;
pub mod support_tickets;
pub mod users;

pub use common::{
    ApiResponse, FieldError, FieldErrors, PaginatedResponse, PaginationInfo, PaginationQuery,
};

// 业务错误码，写入 ApiResponse.code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1005,
    RateLimitExceeded = 1006,
    InternalServerError = 1099,

    // 认证
    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserNotFound = 2002,
    UsernameAlreadyExists = 2003,
    ExternalProviderDisabled = 2004,
    ExternalLoginFailed = 2005,

    // 内容
    DepartmentNotFound = 3000,
    DepartmentCodeInUse = 3001,
    DepartmentInUse = 3002,
    FacultyMemberNotFound = 3100,
    ExamNotFound = 3200,
    ExamBusinessIdInUse = 3201,
    ArchiveItemNotFound = 3300,
    AlertNotFound = 3400,
    NewsItemNotFound = 3500,
    StudyPlanNotFound = 3600,

    // 支持工单
    SupportTicketNotFound = 4000,
    SupportTicketCreateFailed = 4001,
    EmailSendFailed = 4002,

    // 文件
    FileUploadFailed = 5000,
    FileTypeNotAllowed = 5001,
    FileSizeExceeded = 5002,
    FileNotFound = 5003,
    MultifileUploadNotAllowed = 5004,
}
