use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    User,  // 普通用户
    Admin, // 管理员
}

impl UserRole {
    pub const USER: &'static str = "user";
    pub const ADMIN: &'static str = "admin";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!("无效的用户角色: '{s}'. 支持的角色: user, admin"))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::User => write!(f, "{}", UserRole::USER),
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::USER => Ok(UserRole::User),
            UserRole::ADMIN => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 第三方登录提供方
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum ExternalProvider {
    Google,
    Github,
    Facebook,
}

impl ExternalProvider {
    pub const ALL: [ExternalProvider; 3] = [
        ExternalProvider::Google,
        ExternalProvider::Github,
        ExternalProvider::Facebook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExternalProvider::Google => "google",
            ExternalProvider::Github => "github",
            ExternalProvider::Facebook => "facebook",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExternalProvider::Google => "Google",
            ExternalProvider::Github => "GitHub",
            ExternalProvider::Facebook => "Facebook",
        }
    }
}

impl<'de> Deserialize<'de> for ExternalProvider {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的登录提供方: '{s}'. 支持: google, github, facebook"
            ))
        })
    }
}

impl std::fmt::Display for ExternalProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExternalProvider {
    type Err = String;

    // 路由中的大小写不固定
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(ExternalProvider::Google),
            "github" => Ok(ExternalProvider::Github),
            "facebook" => Ok(ExternalProvider::Facebook),
            _ => Err(format!("Unknown external provider: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub full_name: Option<String>,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub provider: Option<ExternalProvider>,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub provider_key: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// 姓名为空时显示登录名
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.username)
    }

    /// 仅通过第三方登录创建的账号没有本地密码
    pub fn has_local_password(&self) -> bool {
        self.password_hash.as_deref().is_some_and(|h| !h.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_strings() {
        assert_eq!("admin".parse::<UserRole>(), Ok(UserRole::Admin));
        assert!("Admin".parse::<UserRole>().is_err());
        assert_eq!(UserRole::User.to_string(), "user");
        let err = serde_json::from_str::<UserRole>("\"teacher\"").unwrap_err();
        assert!(err.to_string().contains("teacher"));
    }

    #[test]
    fn test_provider_parse_is_case_insensitive() {
        assert_eq!("GitHub".parse::<ExternalProvider>(), Ok(ExternalProvider::Github));
        assert!("twitter".parse::<ExternalProvider>().is_err());
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = User {
            id: 1,
            username: "0790000000".into(),
            full_name: Some("  ".into()),
            password_hash: None,
            role: UserRole::User,
            provider: Some(ExternalProvider::Google),
            provider_key: Some("abc".into()),
            created_at: chrono::Utc::now(),
        };
        assert_eq!(user.display_name(), "0790000000");
        assert!(!user.has_local_password());
        user.full_name = Some("Omar".into());
        assert_eq!(user.display_name(), "Omar");
    }

    #[test]
    fn test_sensitive_fields_are_not_serialized() {
        let user = User {
            id: 1,
            username: "a@b.co".into(),
            full_name: None,
            password_hash: Some("$argon2id$...".into()),
            role: UserRole::User,
            provider: None,
            provider_key: Some("k".into()),
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("provider_key").is_none());
    }
}
