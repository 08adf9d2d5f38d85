//! 邮件发送
//!
//! SMTP 未配置时使用 [`DisabledEmailSender`]，发送请求直接返回错误。

mod support_reply;

pub use support_reply::support_reply_email;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::SmtpConfig;
use crate::errors::{MutaError, Result};

/// 待发送的 HTML 邮件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub html_body: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<()>;
}

pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from_address = config
            .from_email
            .parse()
            .map_err(|e| MutaError::email_delivery(format!("发件地址无效: {e}")))?;
        let from = Mailbox::new(Some(config.from_name.clone()), from_address);

        let mut builder = if config.enable_ssl {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| MutaError::email_delivery(format!("SMTP 配置无效: {e}")))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        builder = builder.port(config.port);

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        let address = message
            .to
            .parse()
            .map_err(|e| MutaError::email_delivery(format!("收件地址无效: {e}")))?;
        let to = Mailbox::new(message.to_name.clone(), address);

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(message.html_body)
            .map_err(|e| MutaError::email_delivery(format!("邮件构建失败: {e}")))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MutaError::email_delivery(format!("SMTP 发送失败: {e}")))?;

        info!(to = %message.to, subject = %message.subject, "Email sent");
        Ok(())
    }
}

/// SMTP 未配置时的占位实现
pub struct DisabledEmailSender;

#[async_trait]
impl EmailSender for DisabledEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        warn!(to = %message.to, "SMTP is not configured, email not sent");
        Err(MutaError::email_delivery("SMTP is not configured"))
    }
}

/// 按配置创建邮件发送器，host 为空或配置无效时返回禁用实现
pub fn create_email_sender(config: &SmtpConfig) -> Arc<dyn EmailSender> {
    if config.host.trim().is_empty() {
        info!("SMTP host not set, outbound email disabled");
        return Arc::new(DisabledEmailSender);
    }

    match SmtpEmailSender::new(config) {
        Ok(sender) => {
            info!("SMTP email sender configured for {}:{}", config.host, config.port);
            Arc::new(sender)
        }
        Err(e) => {
            warn!("Failed to configure SMTP sender, email disabled: {}", e);
            Arc::new(DisabledEmailSender)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// 记录发送内容的测试实现
    #[derive(Default)]
    pub(crate) struct RecordingEmailSender {
        pub sent: Mutex<Vec<EmailMessage>>,
        pub fail_with: Option<String>,
    }

    #[async_trait]
    impl EmailSender for RecordingEmailSender {
        async fn send(&self, message: EmailMessage) -> Result<()> {
            self.sent.lock().unwrap().push(message);
            match &self.fail_with {
                Some(msg) => Err(MutaError::email_delivery(msg.clone())),
                None => Ok(()),
            }
        }
    }

    fn smtp_config(host: &str) -> SmtpConfig {
        SmtpConfig {
            host: host.to_string(),
            port: 587,
            enable_ssl: true,
            from_email: "support@mutah.edu.jo".to_string(),
            from_name: "Mutah Engineering Support".to_string(),
            username: String::new(),
            password: String::new(),
        }
    }

    #[tokio::test]
    async fn test_disabled_sender_reports_error() {
        let sender = create_email_sender(&smtp_config("  "));
        let err = sender
            .send(EmailMessage {
                to: "student@example.com".to_string(),
                to_name: None,
                subject: "Hi".to_string(),
                html_body: "<p>Hi</p>".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E014");
    }

    #[test]
    fn test_invalid_from_address_rejected() {
        let mut config = smtp_config("smtp.example.com");
        config.from_email = "not-an-address".to_string();
        assert!(SmtpEmailSender::new(&config).is_err());
    }
}
