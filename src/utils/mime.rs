use std::path::Path;

fn extension(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// 按扩展名推断 MIME 类型
pub fn mime_type(path: &str) -> &'static str {
    match extension(path).as_str() {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "pdf" => "application/pdf",
        "txt" => "text/plain; charset=utf-8",
        "xml" => "application/xml",
        _ => "application/octet-stream",
    }
}

/// 带 hash 的前端资源与上传的图片可以长期缓存
pub fn is_immutable_asset(path: &str) -> bool {
    matches!(
        extension(path).as_str(),
        "js" | "css" | "woff" | "woff2" | "ttf" | "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(mime_type("img/news/a.JPG"), "image/jpeg");
        assert_eq!(mime_type("docs/plans/civil/plan-2025.pdf"), "application/pdf");
        assert_eq!(mime_type("archive.rar"), "application/octet-stream");
    }

    #[test]
    fn test_immutable_assets() {
        assert!(is_immutable_asset("assets/app.js"));
        assert!(is_immutable_asset("img/departments/x.webp"));
        assert!(!is_immutable_asset("index.html"));
        assert!(!is_immutable_asset("docs/plan.pdf"));
    }
}
