use actix_web::{HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::StudyPlanService;

static STUDY_PLAN_SERVICE: Lazy<StudyPlanService> = Lazy::new(StudyPlanService::new_lazy);

pub async fn list_plans() -> ActixResult<HttpResponse> {
    STUDY_PLAN_SERVICE.list_plans().await
}

pub async fn get_plan(path: web::Path<(String, i32)>) -> ActixResult<HttpResponse> {
    let (department, year) = path.into_inner();
    STUDY_PLAN_SERVICE.get_plan(department, year).await
}

pub fn configure_study_plan_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/study-plans")
            .route("", web::get().to(list_plans))
            .route("/{department}/{year}", web::get().to(get_plan)),
    );
}
