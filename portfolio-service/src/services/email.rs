//! Contact-form email delivery.

use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, Message,
    SmtpTransport, Transport,
};
use service_core::error::AppError;
use std::time::Duration;

use crate::config::SmtpConfig;

/// Outbound mail seam. The contact handler talks to this trait so tests can
/// substitute delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_contact_message(
        &self,
        sender_name: &str,
        reply_to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), AppError>;
}

/// SMTP-backed mailer. Sends run on the blocking thread pool so a slow relay
/// never stalls the async runtime.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: SmtpTransport,
    from_email: String,
    to_email: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, AppError> {
        let creds = Credentials::new(config.user.clone(), config.password.clone());

        let mailer = SmtpTransport::relay(&config.host)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!(e.to_string())))?
            .credentials(creds)
            .port(config.port)
            .timeout(Some(Duration::from_secs(10)))
            .build();

        tracing::info!(host = %config.host, "SMTP mailer initialized");

        Ok(Self {
            mailer,
            from_email: config.from_email.clone(),
            to_email: config.to_email.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_contact_message(
        &self,
        sender_name: &str,
        reply_to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), AppError> {
        let email = Message::builder()
            .from(
                self.from_email
                    .parse()
                    .map_err(|e: lettre::address::AddressError| {
                        AppError::InternalError(e.into())
                    })?,
            )
            .to(self
                .to_email
                .parse()
                .map_err(|e: lettre::address::AddressError| AppError::InternalError(e.into()))?)
            .reply_to(
                reply_to
                    .parse()
                    .map_err(|e: lettre::address::AddressError| {
                        AppError::InternalError(e.into())
                    })?,
            )
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(format!("From: {} <{}>\n\n{}", sender_name, reply_to, body))
            .map_err(|e| AppError::InternalError(e.into()))?;

        let mailer = self.mailer.clone();
        let result = tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::InternalError(e.into()))?;

        match result {
            Ok(_) => {
                tracing::info!(reply_to = %reply_to, "Contact message delivered");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e.to_string(), "Failed to send contact message");
                Err(AppError::EmailError(e.to_string()))
            }
        }
    }
}

/// Stand-in used when no SMTP settings are configured. Every send fails with
/// a clear error; no message is ever dropped silently.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send_contact_message(
        &self,
        _sender_name: &str,
        _reply_to: &str,
        _subject: &str,
        _body: &str,
    ) -> Result<(), AppError> {
        Err(AppError::EmailError(
            "email delivery is not configured".to_string(),
        ))
    }
}
