use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AlertService, prepare_input};
use crate::models::ApiResponse;
use crate::models::alerts::requests::AlertRequest;
use crate::services::internal_error;

pub async fn create_alert(
    service: &AlertService,
    request: &HttpRequest,
    alert: AlertRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let input = match prepare_input(&storage, alert).await {
        Ok(input) => input,
        Err(response) => return Ok(response),
    };

    match storage.create_alert(input).await {
        Ok(alert) => {
            info!("Alert {} created", alert.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                alert,
                "Alert created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create alert", e)),
    }
}
