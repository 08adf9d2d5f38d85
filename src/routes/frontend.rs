//! 站点前端
//!
//! 构建产物由 rust-embed 嵌入二进制；`./frontend-custom/` 下的同名文件优先，
//! 便于不重新编译就替换页面。未匹配的路径回退到 `index.html`，交给前端路由。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;

use crate::config::AppConfig;
use crate::utils::mime::{is_immutable_asset, mime_type};

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct SiteAssets;

const INDEX: &str = "index.html";

fn read_asset(path: &str) -> Option<Vec<u8>> {
    std::fs::read(format!("./frontend-custom/{path}"))
        .ok()
        .or_else(|| SiteAssets::get(path).map(|f| f.data.to_vec()))
}

// 页面标题占位符
fn render_index(content: &[u8], system_name: &str) -> Vec<u8> {
    String::from_utf8_lossy(content)
        .replace("%SYSTEM_NAME%", system_name)
        .into_bytes()
}

fn missing_frontend(system_name: &str) -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title></head>\
             <body><h1>Frontend Not Found</h1>\
             <p>The site bundle has not been built or embedded.</p></body></html>",
            crate::utils::html::escape_html(system_name)
        ))
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');
    let system_name = &AppConfig::get().app.system_name;

    let (file_path, content) = match (!path.is_empty()).then(|| read_asset(path)).flatten() {
        Some(content) => (path, Some(content)),
        None => (INDEX, read_asset(INDEX)),
    };

    let Some(mut data) = content else {
        return Ok(missing_frontend(system_name));
    };

    let mime = mime_type(file_path);
    if file_path == INDEX {
        data = render_index(&data, system_name);
    }

    let cache_control = if is_immutable_asset(file_path) {
        "public, max-age=31536000, immutable"
    } else {
        "no-cache, no-store, must-revalidate"
    };

    Ok(HttpResponse::Ok()
        .content_type(mime)
        .insert_header(("Cache-Control", cache_control))
        .body(data))
}

/// 必须最后注册：匹配所有其余 GET 请求
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_index_fills_system_name() {
        let html = b"<title>%SYSTEM_NAME%</title>";
        let rendered = render_index(html, "Faculty of Engineering");
        assert_eq!(rendered, b"<title>Faculty of Engineering</title>".to_vec());
    }

    #[test]
    fn test_missing_frontend_escapes_name() {
        let resp = missing_frontend("<b>");
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
