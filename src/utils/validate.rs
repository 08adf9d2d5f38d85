use once_cell::sync::Lazy;
use regex::Regex;

// 手机号：可选前导 +，其余为数字，总长 7..=20
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{6,19}$").expect("Invalid phone regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone) {
        return Err("Enter a valid phone number.");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Enter a valid email address.");
    }
    Ok(())
}

/// 本地注册密码：至少 6 个字符，且与确认密码一致
pub fn validate_password(password: &str, confirm_password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 6 characters long.");
    }
    if password != confirm_password {
        return Err("Passwords do not match.");
    }
    Ok(())
}

/// 站内跳转地址：以单个 `/` 开头，其他情况一律回到首页
pub fn sanitize_return_url(return_url: Option<&str>) -> String {
    match return_url.map(str::trim) {
        Some(url) if is_local_url(url) => url.to_string(),
        _ => "/".to_string(),
    }
}

fn is_local_url(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_numbers() {
        assert!(validate_phone("0791234567").is_ok());
        assert!(validate_phone("+962791234567").is_ok());
        assert!(validate_phone("123456").is_err());
        assert!(validate_phone("07912a4567").is_err());
        assert!(validate_phone("++962791234567").is_err());
        assert!(validate_phone("123456789012345678901").is_err());
    }

    #[test]
    fn test_emails() {
        assert!(validate_email("student@mutah.edu.jo").is_ok());
        assert!(validate_email("no-at-sign.example").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("secret", "secret").is_ok());
        assert_eq!(
            validate_password("abc", "abc"),
            Err("Password must be at least 6 characters long.")
        );
        assert_eq!(
            validate_password("secret1", "secret2"),
            Err("Passwords do not match.")
        );
    }

    #[test]
    fn test_return_url_must_be_local() {
        assert_eq!(sanitize_return_url(Some("/exams?dept=CIV")), "/exams?dept=CIV");
        assert_eq!(sanitize_return_url(Some("//evil.example")), "/");
        assert_eq!(sanitize_return_url(Some("/\\evil.example")), "/");
        assert_eq!(sanitize_return_url(Some("https://evil.example")), "/");
        assert_eq!(sanitize_return_url(None), "/");
    }
}
