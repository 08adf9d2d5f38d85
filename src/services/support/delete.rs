use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SupportService, not_found};
use crate::models::ApiResponse;
use crate::services::internal_error;
use crate::utils::upload::{UploadKind, delete_old_file};

pub async fn delete_ticket(
    service: &SupportService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_support_ticket(id).await {
        Ok(Some(ticket)) => {
            delete_old_file(UploadKind::SupportScreenshot, ticket.screenshot_path.as_deref());
            info!("Support ticket {} deleted", ticket.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Support ticket deleted successfully",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to delete support ticket", e)),
    }
}
