use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::alerts::requests::{AlertListParams, AlertRequest, LatestAlertsParams};
use crate::models::users::entities::UserRole;
use crate::services::AlertService;
use crate::utils::SafeIDI64;

static ALERT_SERVICE: Lazy<AlertService> = Lazy::new(AlertService::new_lazy);

pub async fn list_alerts(
    req: HttpRequest,
    query: web::Query<AlertListParams>,
) -> ActixResult<HttpResponse> {
    ALERT_SERVICE.list_alerts(&req, query.into_inner()).await
}

pub async fn latest_alerts(
    req: HttpRequest,
    query: web::Query<LatestAlertsParams>,
) -> ActixResult<HttpResponse> {
    ALERT_SERVICE.latest_alerts(&req, query.into_inner()).await
}

pub async fn get_alert(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ALERT_SERVICE.get_alert(&req, id.0).await
}

pub async fn create_alert(
    req: HttpRequest,
    data: web::Json<AlertRequest>,
) -> ActixResult<HttpResponse> {
    ALERT_SERVICE.create_alert(&req, data.into_inner()).await
}

pub async fn update_alert(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<AlertRequest>,
) -> ActixResult<HttpResponse> {
    ALERT_SERVICE
        .update_alert(&req, id.0, data.into_inner())
        .await
}

pub async fn delete_alert(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ALERT_SERVICE.delete_alert(&req, id.0).await
}

pub fn configure_alert_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/alerts")
            .service(
                web::resource("")
                    .route(web::get().to(list_alerts))
                    .route(
                        web::post()
                            .to(create_alert)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            // 首页最新提醒
            .route("/latest", web::get().to(latest_alerts))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_alert))
                    .route(
                        web::put()
                            .to(update_alert)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    )
                    .route(
                        web::delete()
                            .to(delete_alert)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    ),
            ),
    );
}
