use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AlertService, not_found};
use crate::models::ApiResponse;
use crate::services::internal_error;

pub async fn get_alert(
    service: &AlertService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_alert(id).await {
        Ok(Some(alert)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            alert,
            "Alert retrieved successfully",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to get alert", e)),
    }
}
