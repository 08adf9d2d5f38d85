use actix_web::{HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::MediaService;
use crate::services::media::MediaRoot;

static MEDIA_SERVICE: Lazy<MediaService> = Lazy::new(MediaService::new_lazy);

pub async fn serve_image(tail: web::Path<String>) -> ActixResult<HttpResponse> {
    MEDIA_SERVICE.serve(MediaRoot::Images, tail.into_inner()).await
}

pub async fn serve_upload(tail: web::Path<String>) -> ActixResult<HttpResponse> {
    MEDIA_SERVICE.serve(MediaRoot::Uploads, tail.into_inner()).await
}

pub async fn serve_doc(tail: web::Path<String>) -> ActixResult<HttpResponse> {
    MEDIA_SERVICE.serve(MediaRoot::Docs, tail.into_inner()).await
}

// 需在前端回退路由之前注册
pub fn configure_media_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/img/{tail:.*}", web::get().to(serve_image))
        .route("/uploads/{tail:.*}", web::get().to(serve_upload))
        .route("/docs/{tail:.*}", web::get().to(serve_doc));
}
