use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::support_tickets::requests::{ReplyRequest, TicketListParams};
use crate::models::users::entities::UserRole;
use crate::services::SupportService;
use crate::utils::SafeIDI64;

static SUPPORT_SERVICE: Lazy<SupportService> = Lazy::new(SupportService::new_lazy);

pub async fn create_ticket(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    SUPPORT_SERVICE.create_ticket(&req, payload).await
}

pub async fn list_tickets(
    req: HttpRequest,
    query: web::Query<TicketListParams>,
) -> ActixResult<HttpResponse> {
    SUPPORT_SERVICE.list_tickets(&req, query.into_inner()).await
}

pub async fn get_ticket(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUPPORT_SERVICE.get_ticket(&req, id.0).await
}

pub async fn delete_ticket(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUPPORT_SERVICE.delete_ticket(&req, id.0).await
}

pub async fn reply_ticket(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<ReplyRequest>,
) -> ActixResult<HttpResponse> {
    SUPPORT_SERVICE
        .reply_ticket(&req, id.0, data.into_inner())
        .await
}

pub fn configure_support_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/support")
            .service(
                // 公开提交工单
                web::resource("")
                    .wrap(middlewares::RateLimit::support_ticket())
                    .route(web::post().to(create_ticket)),
            )
            .service(
                web::scope("/tickets")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .wrap(middlewares::RequireJWT)
                    .route("", web::get().to(list_tickets))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(get_ticket))
                            .route(web::delete().to(delete_ticket)),
                    )
                    .route("/{id}/reply", web::post().to(reply_ticket)),
            ),
    );
}
