use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::departments::requests::{DepartmentListParams, DepartmentRequest};
use crate::models::users::entities::UserRole;
use crate::services::DepartmentService;
use crate::utils::SafeIDI64;

static DEPARTMENT_SERVICE: Lazy<DepartmentService> = Lazy::new(DepartmentService::new_lazy);

pub async fn list_departments(
    req: HttpRequest,
    query: web::Query<DepartmentListParams>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .list_departments(&req, query.into_inner())
        .await
}

pub async fn get_department(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.get_department(&req, id.0).await
}

pub async fn create_department(
    req: HttpRequest,
    data: web::Json<DepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .create_department(&req, data.into_inner())
        .await
}

pub async fn update_department(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<DepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .update_department(&req, id.0, data.into_inner())
        .await
}

pub async fn delete_department(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.delete_department(&req, id.0).await
}

pub async fn upload_image(
    req: HttpRequest,
    id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.upload_image(&req, id.0, payload).await
}

// 配置路由：读取公开，写入仅管理员
pub fn configure_department_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/departments")
            .service(
                web::resource("")
                    .route(web::get().to(list_departments))
                    .route(
                        web::post()
                            .to(create_department)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_department))
                    .route(
                        web::put()
                            .to(update_department)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    )
                    .route(
                        web::delete()
                            .to(delete_department)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            .service(
                web::resource("/{id}/image").route(
                    web::post()
                        .to(upload_image)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                        .wrap(middlewares::RequireJWT),
                ),
            ),
    );
}
