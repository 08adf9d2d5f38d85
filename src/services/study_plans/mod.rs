mod catalog;

use actix_web::{HttpResponse, Result as ActixResult};

use crate::models::study_plans::StudyPlansResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 学习计划是静态目录，不访问存储
pub struct StudyPlanService;

impl StudyPlanService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn list_plans(&self) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudyPlansResponse {
                departments: catalog::departments(),
                plans: catalog::plans(),
            },
            "Study plans",
        )))
    }

    pub async fn get_plan(&self, department: String, year: i32) -> ActixResult<HttpResponse> {
        match catalog::find(&department, year) {
            Some(plan) => Ok(HttpResponse::Ok().json(ApiResponse::success(plan, "Study plan"))),
            None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudyPlanNotFound,
                "Study plan not found",
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_get_plan_status() {
        let service = StudyPlanService::new_lazy();
        let resp = service.get_plan("elec".to_string(), 2025).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = service.get_plan("elec".to_string(), 2010).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
