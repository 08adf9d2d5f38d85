use super::EmailMessage;
use crate::models::support_tickets::entities::SupportTicket;
use crate::utils::html::{escape_html, text_to_html};

pub const SUPPORT_REPLY_SUBJECT: &str = "Mutah Engineering Support – الرد على بلاغك";

/// 工单回复通知邮件
pub fn support_reply_email(ticket: &SupportTicket, reply: &str) -> EmailMessage {
    let name = escape_html(&ticket.full_name);
    let issue = escape_html(ticket.issue_type.label_en());
    let body = text_to_html(reply);

    let html_body = format!(
        r#"<div style="font-family:Arial,sans-serif;line-height:1.6">
<p>Dear {name},</p>
<p>Thank you for contacting Mutah University Faculty of Engineering support.</p>
<p><strong>Issue type:</strong> {issue}</p>
<div style="border-left:3px solid #0b5394;padding-left:12px;margin:16px 0">{body}</div>
<p>Best regards,<br/>Faculty of Engineering Support Team</p>
<hr/>
<p style="font-size:12px;color:#777">This message was sent in reply to ticket #{id}. Please do not reply to this email.</p>
</div>"#,
        id = ticket.id,
    );

    EmailMessage {
        to: ticket.email.clone(),
        to_name: Some(ticket.full_name.clone()),
        subject: SUPPORT_REPLY_SUBJECT.to_string(),
        html_body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::support_tickets::entities::SupportIssueType;

    fn ticket() -> SupportTicket {
        SupportTicket {
            id: 12,
            full_name: "Lina <Haddad>".to_string(),
            university_id: None,
            email: "lina@example.com".to_string(),
            course_exam: None,
            issue_type: SupportIssueType::AccountProblem,
            description: "Cannot log in".to_string(),
            screenshot_path: None,
            admin_reply: None,
            created_at: chrono::Utc::now(),
            replied_at: None,
            is_resolved: false,
        }
    }

    #[test]
    fn test_reply_email_content() {
        let email = support_reply_email(&ticket(), "Reset done.\nTry again <now>");
        assert_eq!(email.to, "lina@example.com");
        assert_eq!(email.subject, SUPPORT_REPLY_SUBJECT);
        assert!(email.html_body.contains("Dear Lina &lt;Haddad&gt;,"));
        assert!(email.html_body.contains("Account problem"));
        assert!(email.html_body.contains("Reset done.<br/>Try again &lt;now&gt;"));
        assert!(email.html_body.contains("ticket #12"));
    }
}
