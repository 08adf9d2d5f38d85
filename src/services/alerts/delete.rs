use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AlertService, not_found};
use crate::models::ApiResponse;
use crate::services::internal_error;

pub async fn delete_alert(
    service: &AlertService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_alert(id).await {
        Ok(true) => {
            info!("Alert {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Alert deleted successfully")))
        }
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to delete alert", e)),
    }
}
