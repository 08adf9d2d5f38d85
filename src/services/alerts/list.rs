use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AlertService;
use crate::models::ApiResponse;
use crate::models::alerts::requests::{AlertListParams, AlertListQuery, LatestAlertsParams};
use crate::models::alerts::responses::AlertListResponse;
use crate::services::internal_error;
use crate::utils::normalize_search;

const DEFAULT_LATEST_LIMIT: u64 = 6;
const MAX_LATEST_LIMIT: u64 = 50;

pub async fn list_alerts(
    service: &AlertService,
    request: &HttpRequest,
    params: AlertListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 昨天及以后的通知仍视为即将到来
    let not_before = params
        .upcoming_only
        .unwrap_or(true)
        .then(|| chrono::Utc::now() - chrono::Duration::days(1));

    let query = AlertListQuery {
        department_id: params.dep_id.filter(|id| *id > 0),
        search: normalize_search(params.q.as_deref()),
        not_before,
    };

    let items = match storage.list_alerts(query).await {
        Ok(items) => items,
        Err(e) => return Ok(internal_error("Failed to list alerts", e)),
    };
    let departments = match storage.list_department_summaries().await {
        Ok(departments) => departments,
        Err(e) => return Ok(internal_error("Failed to list departments", e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AlertListResponse { items, departments },
        "Alerts retrieved successfully",
    )))
}

pub async fn latest_alerts(
    service: &AlertService,
    request: &HttpRequest,
    params: LatestAlertsParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let limit = params
        .limit
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_LATEST_LIMIT)
        .min(MAX_LATEST_LIMIT);

    match storage.latest_alerts(limit).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Latest alerts retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list latest alerts", e)),
    }
}
