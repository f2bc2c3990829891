//! SMTP mail transport.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use gfiles_core::config::mail::MailConfig;
use gfiles_core::error::AppError;
use gfiles_core::result::AppResult;

/// A rendered email ready for dispatch.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plaintext body.
    pub text_body: String,
    /// HTML body.
    pub html_body: String,
}

/// Sends rendered emails.
///
/// Defined as a trait so services can be exercised against a recording
/// implementation in tests.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Send exactly one email.
    async fn send(&self, email: OutboundEmail) -> AppResult<()>;
}

/// SMTP implementation of [`Mailer`] over a STARTTLS relay.
#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Create a new mailer from mail configuration.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let from: Mailbox = config.from_address.parse().map_err(|e| {
            AppError::configuration(format!(
                "Invalid from address '{}': {e}",
                config.from_address
            ))
        })?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| AppError::configuration(format!("Invalid SMTP relay config: {e}")))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutboundEmail) -> AppResult<()> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| AppError::validation(format!("Invalid recipient '{}': {e}", email.to)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&email.subject)
            .multipart(MultiPart::alternative_plain_html(
                email.text_body,
                email.html_body,
            ))
            .map_err(|e| AppError::internal(format!("Failed to build email: {e}")))?;

        self.transport.send(message).await.map_err(|e| {
            AppError::with_source(
                gfiles_core::error::ErrorKind::ExternalService,
                "SMTP relay rejected the message",
                e,
            )
        })?;

        info!(to = %email.to, subject = %email.subject, "Share notification sent");
        Ok(())
    }
}
