use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::news::requests::{NewsItemRequest, NewsListParams};
use crate::models::users::entities::UserRole;
use crate::services::NewsService;
use crate::utils::SafeIDI64;

static NEWS_SERVICE: Lazy<NewsService> = Lazy::new(NewsService::new_lazy);

pub async fn list_news(
    req: HttpRequest,
    query: web::Query<NewsListParams>,
) -> ActixResult<HttpResponse> {
    NEWS_SERVICE.list_news(&req, query.into_inner()).await
}

pub async fn get_news_item(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NEWS_SERVICE.get_news_item(&req, id.0).await
}

pub async fn create_news_item(
    req: HttpRequest,
    data: web::Json<NewsItemRequest>,
) -> ActixResult<HttpResponse> {
    NEWS_SERVICE.create_news_item(&req, data.into_inner()).await
}

pub async fn update_news_item(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<NewsItemRequest>,
) -> ActixResult<HttpResponse> {
    NEWS_SERVICE
        .update_news_item(&req, id.0, data.into_inner())
        .await
}

pub async fn delete_news_item(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NEWS_SERVICE.delete_news_item(&req, id.0).await
}

pub async fn upload_image(
    req: HttpRequest,
    id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    NEWS_SERVICE.upload_image(&req, id.0, payload).await
}

pub fn configure_news_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/news")
            .service(
                web::resource("")
                    .route(web::get().to(list_news))
                    .route(
                        web::post()
                            .to(create_news_item)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_news_item))
                    .route(
                        web::put()
                            .to(update_news_item)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    )
                    .route(
                        web::delete()
                            .to(delete_news_item)
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
