use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{info, warn};

use super::{SupportService, not_found};
use crate::mail::{EmailSender, support_reply_email};
use crate::models::{ApiResponse, ErrorCode};
use crate::models::support_tickets::entities::SupportTicket;
use crate::models::support_tickets::requests::ReplyRequest;
use crate::models::support_tickets::responses::ReplyResponse;
use crate::services::{internal_error, validation_response};
use crate::storage::Storage;

pub async fn reply_ticket(
    service: &SupportService,
    request: &HttpRequest,
    id: i64,
    reply: ReplyRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(errors) = reply.validate() {
        return Ok(validation_response(errors));
    }

    match reply_and_notify(&storage, service.get_mailer(request), id, reply).await {
        Ok(Some(response)) if response.email_sent => Ok(HttpResponse::Ok().json(
            ApiResponse::success(response, "Reply saved and emailed"),
        )),
        // 回复已保存，只是邮件没发出去
        Ok(Some(response)) => Ok(HttpResponse::Ok().json(ApiResponse::error(
            ErrorCode::EmailSendFailed,
            response,
            "Reply saved, but the email could not be sent",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to save reply", e)),
    }
}

/// 保存回复后发送一封通知邮件，发送结果写入响应
pub(crate) async fn reply_and_notify(
    storage: &Arc<dyn Storage>,
    mailer: Option<Arc<dyn EmailSender>>,
    id: i64,
    reply: ReplyRequest,
) -> crate::errors::Result<Option<ReplyResponse>> {
    let text = reply.reply.trim();
    let Some(ticket) = storage
        .reply_support_ticket(id, text, reply.mark_resolved)
        .await?
    else {
        return Ok(None);
    };
    info!(
        "Support ticket {} replied (resolved: {})",
        ticket.id, ticket.is_resolved
    );

    let email_error = notify_requester(mailer, &ticket, text).await.err();
    Ok(Some(ReplyResponse {
        email_sent: email_error.is_none(),
        email_error,
        ticket,
    }))
}

async fn notify_requester(
    mailer: Option<Arc<dyn EmailSender>>,
    ticket: &SupportTicket,
    reply: &str,
) -> Result<(), String> {
    let Some(mailer) = mailer else {
        warn!("No email sender registered, ticket {} reply not emailed", ticket.id);
        return Err("Email sender is not available".to_string());
    };

    mailer
        .send(support_reply_email(ticket, reply))
        .await
        .map_err(|e| {
            warn!("Failed to email reply for ticket {}: {}", ticket.id, e);
            e.message().to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::tests::RecordingEmailSender;
    use crate::models::support_tickets::requests::SupportTicketForm;
    use crate::services::test_support::memory_storage;

    async fn ticket(storage: &Arc<dyn Storage>) -> SupportTicket {
        storage
            .create_support_ticket(
                SupportTicketForm {
                    full_name: "Omar Nasser".to_string(),
                    email: "omar@example.com".to_string(),
                    description: "I cannot open the midterm".to_string(),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap()
    }

    fn reply(text: &str, mark_resolved: bool) -> ReplyRequest {
        ReplyRequest {
            reply: text.to_string(),
            mark_resolved,
        }
    }

    #[tokio::test]
    async fn test_reply_resolves_and_sends_exactly_one_email() {
        let storage = memory_storage().await;
        let ticket = ticket(&storage).await;
        let mailer = Arc::new(RecordingEmailSender::default());

        let response = reply_and_notify(
            &storage,
            Some(mailer.clone() as Arc<dyn EmailSender>),
            ticket.id,
            reply(" The link is fixed.\nPlease retry. ", true),
        )
        .await
        .unwrap()
        .unwrap();

        assert!(response.email_sent);
        assert!(response.email_error.is_none());
        assert!(response.ticket.is_resolved);
        assert!(response.ticket.replied_at.is_some());
        assert_eq!(
            response.ticket.admin_reply.as_deref(),
            Some("The link is fixed.\nPlease retry.")
        );

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "omar@example.com");
        assert!(sent[0].html_body.contains("The link is fixed.<br/>Please retry."));
    }

    #[tokio::test]
    async fn test_email_failure_keeps_saved_reply() {
        let storage = memory_storage().await;
        let ticket = ticket(&storage).await;
        let mailer = Arc::new(RecordingEmailSender {
            fail_with: Some("connection refused".to_string()),
            ..Default::default()
        });

        let response = reply_and_notify(
            &storage,
            Some(mailer.clone() as Arc<dyn EmailSender>),
            ticket.id,
            reply("Looking into it", false),
        )
        .await
        .unwrap()
        .unwrap();

        assert!(!response.email_sent);
        assert_eq!(response.email_error.as_deref(), Some("connection refused"));
        assert!(!response.ticket.is_resolved);
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);

        let stored = storage.get_support_ticket(ticket.id).await.unwrap().unwrap();
        assert_eq!(stored.admin_reply.as_deref(), Some("Looking into it"));
    }

    #[tokio::test]
    async fn test_missing_ticket_sends_nothing() {
        let storage = memory_storage().await;
        let mailer = Arc::new(RecordingEmailSender::default());

        let response = reply_and_notify(
            &storage,
            Some(mailer.clone() as Arc<dyn EmailSender>),
            404,
            reply("Hello", true),
        )
        .await
        .unwrap();

        assert!(response.is_none());
        assert!(mailer.sent.lock().unwrap().is_empty());
    }
}
