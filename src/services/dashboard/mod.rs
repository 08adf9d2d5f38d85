use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ApiResponse;
use crate::models::dashboard::{DashboardResponse, merge_recent_activities};
use crate::storage::Storage;

use super::internal_error;

// 每类动态各取 3 条再合并
const RECENT_PER_KIND: u64 = 3;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    /// 后台首页：计数与最近动态
    pub async fn get_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;

        let counts = match storage.dashboard_counts().await {
            Ok(counts) => counts,
            Err(e) => return Ok(internal_error("Failed to load dashboard", e)),
        };
        let news = match storage.recent_news_activities(RECENT_PER_KIND).await {
            Ok(items) => items,
            Err(e) => return Ok(internal_error("Failed to load dashboard", e)),
        };
        let exams = match storage.recent_exam_activities(RECENT_PER_KIND).await {
            Ok(items) => items,
            Err(e) => return Ok(internal_error("Failed to load dashboard", e)),
        };

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            DashboardResponse {
                counts,
                recent_activities: merge_recent_activities(news, exams),
            },
            "Dashboard loaded",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{body_json, memory_storage, request_with};
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_empty_dashboard() {
        let storage = memory_storage().await;
        let request = request_with(&storage);

        let resp = DashboardService::new_lazy()
            .get_dashboard(&request)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["counts"]["departments"], 0);
        assert_eq!(body["data"]["counts"]["open_tickets"], 0);
        assert_eq!(body["data"]["recent_activities"], serde_json::json!([]));
    }
}
