use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exams::requests::{ExamListParams, ExamRequest};
use crate::models::users::entities::UserRole;
use crate::services::ExamService;
use crate::utils::SafeIDI64;

static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

pub async fn list_exams(
    req: HttpRequest,
    query: web::Query<ExamListParams>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(&req, query.into_inner()).await
}

pub async fn get_exam(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_exam(&req, id.0).await
}

pub async fn get_exam_by_business_id(
    req: HttpRequest,
    business_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .get_exam_by_business_id(&req, business_id.into_inner())
        .await
}

pub async fn create_exam(
    req: HttpRequest,
    data: web::Json<ExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(&req, data.into_inner()).await
}

pub async fn update_exam(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<ExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.update_exam(&req, id.0, data.into_inner()).await
}

pub async fn delete_exam(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(&req, id.0).await
}

pub fn configure_exam_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exams")
            .service(
                web::resource("")
                    .route(web::get().to(list_exams))
                    .route(
                        web::post()
                            .to(create_exam)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            // 按业务编号查询，需在 /{id} 之前注册
            .route(
                "/business/{business_id}",
                web::get().to(get_exam_by_business_id),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_exam))
                    .route(
                        web::put()
                            .to(update_exam)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    )
                    .route(
                        web::delete()
                            .to(delete_exam)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    ),
            ),
    );
}
