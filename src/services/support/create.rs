use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SupportService;
use crate::models::support_tickets::requests::SupportTicketForm;
use crate::models::support_tickets::responses::SupportTicketCreatedResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::validation_response;
use crate::utils::upload::{UploadKind, UploadTarget, read_multipart};

pub async fn create_ticket(
    service: &SupportService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let form = match read_multipart(
        payload,
        &UploadTarget::from_config(UploadKind::SupportScreenshot),
    )
    .await
    {
        Ok(form) => form,
        Err(e) => return Ok(e.into_response()),
    };

    let ticket = SupportTicketForm::from_fields(&form.fields);
    if let Err(errors) = ticket.validate() {
        if let Some(file) = &form.file {
            file.discard();
        }
        return Ok(validation_response(errors));
    }

    let screenshot_path = form.file.as_ref().map(|f| f.web_path.clone());
    match storage.create_support_ticket(ticket, screenshot_path).await {
        Ok(ticket) => {
            info!(
                "Support ticket {} submitted ({})",
                ticket.id,
                ticket.issue_type.label_en()
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                SupportTicketCreatedResponse {
                    id: ticket.id,
                    created_at: ticket.created_at,
                },
                "Your request has been submitted. We will contact you by email.",
            )))
        }
        Err(e) => {
            error!("Failed to save support ticket: {}", e);
            if let Some(file) = &form.file {
                file.discard();
            }
            // 不向公开用户暴露内部错误
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::SupportTicketCreateFailed,
                    "Your request could not be submitted. Please try again later.",
                )),
            )
        }
    }
}
