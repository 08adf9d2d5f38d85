use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AlertService, not_found, prepare_input};
use crate::models::ApiResponse;
use crate::models::alerts::requests::AlertRequest;
use crate::services::internal_error;

pub async fn update_alert(
    service: &AlertService,
    request: &HttpRequest,
    id: i64,
    alert: AlertRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let input = match prepare_input(&storage, alert).await {
        Ok(input) => input,
        Err(response) => return Ok(response),
    };

    match storage.update_alert(id, input).await {
        Ok(Some(alert)) => {
            info!("Alert {} updated", alert.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                alert,
                "Alert updated successfully",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to update alert", e)),
    }
}
