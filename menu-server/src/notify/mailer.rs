//! Mail transports
//!
//! The [`Mailer`] trait is the seam between the outbox worker and the
//! concrete transport: SMTP in production, a logging no-op in development
//! and tests.

use super::templates::Email;
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use shared::error::{AppError, ErrorCode};

/// Outbound mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), AppError>;
}

/// SMTP transport (lettre)
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(host: &str, username: &str, password: &str, from: &str) -> Result<Self, AppError> {
        let from: Mailbox = from
            .parse()
            .map_err(|e| AppError::with_message(ErrorCode::ConfigError, format!("Invalid MAIL_FROM address: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| AppError::with_message(ErrorCode::ConfigError, format!("Invalid SMTP host: {e}")))?
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<(), AppError> {
        let to: Mailbox = email.to.parse().map_err(|e| {
            AppError::with_message(
                ErrorCode::MailTransportError,
                format!("Invalid recipient '{}': {e}", email.to),
            )
        })?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&email.subject)
            .body(email.body.clone())
            .map_err(|e| {
                AppError::with_message(ErrorCode::MailTransportError, format!("Build failed: {e}"))
            })?;

        self.transport.send(message).await.map_err(|e| {
            AppError::with_message(ErrorCode::MailTransportError, format!("Send failed: {e}"))
        })?;
        Ok(())
    }
}

/// Logging transport used when SMTP is not configured (and in tests)
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &Email) -> Result<(), AppError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "Mail transport not configured, logging email instead"
        );
        Ok(())
    }
}
