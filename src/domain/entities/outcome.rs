//! Terminal result of the contact gate.

use crate::error::AppError;

/// How an accepted submission was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// The email was handed to the transport.
    Delivered,
    /// The honeypot was filled; nothing was sent, but the caller sees success.
    Discarded,
}

#[derive(Debug)]
pub enum DeliveryOutcome {
    Accepted(Acceptance),
    Rejected(AppError),
    /// SMTP settings are missing. A deployment problem, not the sender's fault.
    TransportUnavailable,
}

impl DeliveryOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, DeliveryOutcome::Accepted(_))
    }
}

impl From<Result<Acceptance, AppError>> for DeliveryOutcome {
    fn from(result: Result<Acceptance, AppError>) -> Self {
        match result {
            Ok(acceptance) => DeliveryOutcome::Accepted(acceptance),
            Err(AppError::TransportUnavailable) => DeliveryOutcome::TransportUnavailable,
            Err(err) => DeliveryOutcome::Rejected(err),
        }
    }
}
