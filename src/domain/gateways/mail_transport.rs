//! Gateway trait for email dispatch.

use async_trait::async_trait;

use crate::domain::entities::OutboundEmail;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid email address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP send failed: {0}")]
    Send(String),

    #[error("SMTP send timed out")]
    Timeout,
}

/// Sends a rendered contact email to the configured recipient.
///
/// # Implementations
///
/// - [`crate::infrastructure::mail::SmtpMailer`] - SMTP via `lettre`
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Sends one message. Never retried.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the message cannot be built or the server rejects it.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}
