use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    pub upload: UploadConfig,
    pub argon2: Argon2Config,
    pub smtp: SmtpConfig,
    pub oauth: OAuthConfig,
    pub admin: AdminBootstrapConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub secret: String,
    pub access_token_expiry: i64, // 分钟，同时作为会话 cookie 的有效期
    pub refresh_token_expiry: i64, // 天
    pub refresh_token_remember_me_expiry: i64, // 天
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(rename = "type")]
    pub cache_type: String,
    pub default_ttl: u64,
    pub redis: RedisConfig,
    pub memory: MemoryConfig,
}

/// Redis 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub key_prefix: String,
    pub pool_size: u64,
}

/// 内存缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

/// 上传配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub web_root: String,        // 上传文件根目录（img/、uploads/、docs/ 均位于其下）
    pub max_size: usize,         // 图片与 PDF 单文件最大字节数
    pub support_max_size: usize, // 工单截图最大字节数
}

/// Argon2 密码哈希参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

/// SMTP 配置，host 为空表示不发送邮件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default)]
    pub host: String,
    pub port: u16,
    pub enable_ssl: bool,
    pub from_email: String,
    pub from_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// 第三方登录配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    pub public_base_url: String, // 用于拼接回调地址
    #[serde(default)]
    pub google: OAuthClientConfig,
    #[serde(default)]
    pub github: OAuthClientConfig,
    #[serde(default)]
    pub facebook: OAuthClientConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthClientConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(skip_serializing, default)]
    pub client_secret: String,
}

impl OAuthClientConfig {
    /// client id 与 secret 都配置时才启用
    pub fn is_enabled(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

/// 初始管理员账号
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminBootstrapConfig {
    pub username: String,
    pub full_name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}
