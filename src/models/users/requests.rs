use super::entities::{ExternalProvider, UserRole};

// 创建用户（存储层使用），密码已哈希
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub full_name: Option<String>,
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub provider: Option<ExternalProvider>,
    pub provider_key: Option<String>,
}
