pub mod alerts;
pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod exam_archive;
pub mod exams;
pub mod faculty;
pub mod frontend;
pub mod media;
pub mod news;
pub mod study_plans;
pub mod support;

pub use alerts::configure_alert_routes;
pub use auth::configure_auth_routes;
pub use dashboard::configure_dashboard_routes;
pub use departments::configure_department_routes;
pub use exam_archive::configure_exam_archive_routes;
pub use exams::configure_exam_routes;
pub use faculty::configure_faculty_routes;
pub use frontend::configure_frontend_routes;
pub use media::configure_media_routes;
pub use news::configure_news_routes;
pub use study_plans::configure_study_plan_routes;
pub use support::configure_support_routes;
