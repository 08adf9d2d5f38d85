//! 上传文件与静态文档
//!
//! `img/`、`uploads/`、`docs/` 三个目录位于配置的 web 根目录下，按请求路径原样读取。

use actix_web::{HttpResponse, Result as ActixResult, web};
use std::path::{Component, Path, PathBuf};

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::mime::{is_immutable_asset, mime_type};

/// 可公开访问的目录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaRoot {
    Images,
    Uploads,
    Docs,
}

impl MediaRoot {
    pub fn folder(&self) -> &'static str {
        match self {
            MediaRoot::Images => "img",
            MediaRoot::Uploads => "uploads",
            MediaRoot::Docs => "docs",
        }
    }
}

/// 拼出文件路径；含 `..`、根目录或盘符的路径一律拒绝
pub fn resolve_media_path(web_root: &Path, root: MediaRoot, tail: &str) -> Option<PathBuf> {
    let relative = Path::new(tail);
    if tail.is_empty() || tail.contains('\\') {
        return None;
    }
    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return None;
    }
    Some(web_root.join(root.folder()).join(relative))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::FileNotFound, "File not found"))
}

pub struct MediaService;

impl MediaService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn serve(&self, root: MediaRoot, tail: String) -> ActixResult<HttpResponse> {
        let web_root = PathBuf::from(&AppConfig::get().upload.web_root);
        let Some(path) = resolve_media_path(&web_root, root, &tail) else {
            tracing::debug!("Rejected media path: {}/{}", root.folder(), tail);
            return Ok(not_found());
        };

        let file = path.clone();
        let data = match web::block(move || std::fs::read(file)).await {
            Ok(Ok(data)) => data,
            Ok(Err(_)) => return Ok(not_found()),
            Err(e) => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                return Ok(not_found());
            }
        };

        let cache_control = if is_immutable_asset(&tail) {
            "public, max-age=86400"
        } else {
            "no-cache"
        };

        Ok(HttpResponse::Ok()
            .content_type(mime_type(&tail))
            .insert_header(("Cache-Control", cache_control))
            .body(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_media_path_guards_traversal() {
        let root = Path::new("/srv/wwwroot");
        assert_eq!(
            resolve_media_path(root, MediaRoot::Images, "news/a.png"),
            Some(PathBuf::from("/srv/wwwroot/img/news/a.png"))
        );
        assert_eq!(
            resolve_media_path(root, MediaRoot::Docs, "plans/civil/plan-2025.pdf"),
            Some(PathBuf::from("/srv/wwwroot/docs/plans/civil/plan-2025.pdf"))
        );
        assert!(resolve_media_path(root, MediaRoot::Uploads, "../config.toml").is_none());
        assert!(resolve_media_path(root, MediaRoot::Uploads, "support/../../x").is_none());
        assert!(resolve_media_path(root, MediaRoot::Images, "/etc/passwd").is_none());
        assert!(resolve_media_path(root, MediaRoot::Images, "..\\secret").is_none());
        assert!(resolve_media_path(root, MediaRoot::Images, "").is_none());
    }

    #[actix_web::test]
    async fn test_missing_file_is_404() {
        let resp = MediaService::new_lazy()
            .serve(MediaRoot::Docs, "plans/none/plan-1900.pdf".to_string())
            .await
            .unwrap();
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
