use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::faculty::requests::{FacultyListParams, FacultyMemberRequest};
use crate::models::users::entities::UserRole;
use crate::services::FacultyService;
use crate::utils::SafeIDI64;

static FACULTY_SERVICE: Lazy<FacultyService> = Lazy::new(FacultyService::new_lazy);

pub async fn list_faculty(
    req: HttpRequest,
    query: web::Query<FacultyListParams>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.list_faculty(&req, query.into_inner()).await
}

pub async fn get_faculty_member(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.get_faculty_member(&req, id.0).await
}

pub async fn create_faculty_member(
    req: HttpRequest,
    data: web::Json<FacultyMemberRequest>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE
        .create_faculty_member(&req, data.into_inner())
        .await
}

pub async fn update_faculty_member(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<FacultyMemberRequest>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE
        .update_faculty_member(&req, id.0, data.into_inner())
        .await
}

pub async fn delete_faculty_member(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.delete_faculty_member(&req, id.0).await
}

pub async fn upload_photo(
    req: HttpRequest,
    id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.upload_photo(&req, id.0, payload).await
}

pub fn configure_faculty_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/faculty")
            .service(
                web::resource("")
                    .route(web::get().to(list_faculty))
                    .route(
                        web::post()
                            .to(create_faculty_member)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_faculty_member))
                    .route(
                        web::put()
                            .to(update_faculty_member)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    )
                    .route(
                        web::delete()
                            .to(delete_faculty_member)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            .service(
                // 照片上传
                web::resource("/{id}/photo").route(
                    web::post()
                        .to(upload_photo)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                        .wrap(middlewares::RequireJWT),
                ),
            ),
    );
}
