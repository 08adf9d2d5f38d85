use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exam_archive::requests::{
    ArchiveListParams, ArchiveUploadParams, ExamArchiveRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ExamArchiveService;
use crate::utils::SafeIDI64;

static ARCHIVE_SERVICE: Lazy<ExamArchiveService> = Lazy::new(ExamArchiveService::new_lazy);

pub async fn list_items(
    req: HttpRequest,
    query: web::Query<ArchiveListParams>,
) -> ActixResult<HttpResponse> {
    ARCHIVE_SERVICE.list_items(&req, query.into_inner()).await
}

pub async fn get_item(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ARCHIVE_SERVICE.get_item(&req, id.0).await
}

pub async fn create_item(
    req: HttpRequest,
    data: web::Json<ExamArchiveRequest>,
) -> ActixResult<HttpResponse> {
    ARCHIVE_SERVICE.create_item(&req, data.into_inner()).await
}

pub async fn update_item(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<ExamArchiveRequest>,
) -> ActixResult<HttpResponse> {
    ARCHIVE_SERVICE
        .update_item(&req, id.0, data.into_inner())
        .await
}

pub async fn delete_item(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ARCHIVE_SERVICE.delete_item(&req, id.0).await
}

// ?kind=exam|solution，缺省为试卷
pub async fn upload_pdf(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<ArchiveUploadParams>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    ARCHIVE_SERVICE
        .upload_pdf(&req, id.0, query.into_inner().kind, payload)
        .await
}

pub fn configure_exam_archive_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exam-archive")
            .service(
                web::resource("")
                    .route(web::get().to(list_items))
                    .route(
                        web::post()
                            .to(create_item)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_item))
                    .route(
                        web::put()
                            .to(update_item)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    )
                    .route(
                        web::delete()
                            .to(delete_item)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            .service(
                web::resource("/{id}/pdf").route(
                    web::post()
                        .to(upload_pdf)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                        .wrap(middlewares::RequireJWT),
                ),
            ),
    );
}
