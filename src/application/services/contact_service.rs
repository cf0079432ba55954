//! Contact form submission gate.

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::config::GateConfig;
use crate::domain::entities::origin::evaluate_origin;
use crate::domain::entities::submission::MAX_BODY_BYTES;
use crate::domain::entities::{
    Acceptance, DeliveryOutcome, OriginDecision, SanitizedMessage, SubmissionRequest,
};
use crate::domain::gateways::{CaptchaChallenge, CaptchaVerifier, MailTransport};
use crate::error::{AppError, ErrorClass};
use crate::utils::headers::{forwarded_client_ip, is_json_content_type};

/// The parts of an inbound HTTP request the gate looks at.
#[derive(Debug, Clone)]
pub struct ContactRequest {
    pub method: Method,
    pub headers: HeaderMap,
    /// `None` when the body was longer than the read cap and was not buffered.
    pub body: Option<Bytes>,
}

/// Validates a contact submission and forwards it as a single email.
///
/// Checks run in a fixed order, cheapest first, and the first failure ends the request:
///
/// 1. method is POST
/// 2. origin is allowed (best-effort)
/// 3. body is declared JSON
/// 4. body is at most 5000 bytes
/// 5. body parses
/// 6. honeypot is empty, otherwise the submission is silently discarded
/// 7. CAPTCHA token verifies (only when a secret is configured)
/// 8. sanitized fields are well-formed
/// 9. message is at most 500 characters
/// 10. a mail transport is configured
/// 11. the email is sent
///
/// Both network calls (7 and 11) are bounded by the configured timeouts and are
/// never retried. The email is never sent unless the CAPTCHA step passed.
pub struct ContactService {
    config: GateConfig,
    verifier: Arc<dyn CaptchaVerifier>,
    mailer: Option<Arc<dyn MailTransport>>,
}

impl ContactService {
    /// Creates the gate.
    ///
    /// `mailer` is `None` when the SMTP settings are incomplete; every
    /// submission that reaches dispatch then fails with
    /// [`DeliveryOutcome::TransportUnavailable`].
    pub fn new(
        config: GateConfig,
        verifier: Arc<dyn CaptchaVerifier>,
        mailer: Option<Arc<dyn MailTransport>>,
    ) -> Self {
        Self {
            config,
            verifier,
            mailer,
        }
    }

    pub fn captcha_enabled(&self) -> bool {
        self.config.captcha_secret.is_some()
    }

    pub fn transport_configured(&self) -> bool {
        self.mailer.is_some()
    }

    /// Runs a submission through the gate.
    pub async fn submit(&self, request: &ContactRequest) -> DeliveryOutcome {
        let result = self.process(request).await;

        match &result {
            Ok(Acceptance::Delivered) => info!("Contact message delivered"),
            Ok(Acceptance::Discarded) => info!("Honeypot filled, submission discarded"),
            Err(err) => match err.class() {
                ErrorClass::Client => warn!(reason = %err, "Contact submission rejected"),
                ErrorClass::Server => error!(reason = %err, "Contact submission failed"),
            },
        }

        DeliveryOutcome::from(result)
    }

    async fn process(&self, request: &ContactRequest) -> Result<Acceptance, AppError> {
        if request.method != Method::POST {
            return Err(AppError::MethodNotAllowed);
        }

        self.check_origin(&request.headers)?;

        if !is_json_content_type(&request.headers) {
            return Err(AppError::UnsupportedMediaType);
        }

        let body = match &request.body {
            Some(body) if body.len() <= MAX_BODY_BYTES => body,
            _ => return Err(AppError::PayloadTooLarge),
        };

        let submission = SubmissionRequest::from_json(body).map_err(|e| {
            debug!(error = %e, "Contact body is not valid JSON");
            AppError::InvalidInput
        })?;

        if submission.is_honeypot_triggered() {
            return Ok(Acceptance::Discarded);
        }

        self.verify_captcha(&submission, &request.headers).await?;

        let message = SanitizedMessage::from_submission(&submission);
        message.validate().map_err(|_| AppError::InvalidInput)?;
        message.check_length()?;

        let Some(mailer) = &self.mailer else {
            return Err(AppError::TransportUnavailable);
        };

        let email = message.to_email();
        match timeout(self.config.smtp_timeout, mailer.send(&email)).await {
            Ok(Ok(())) => Ok(Acceptance::Delivered),
            Ok(Err(e)) => {
                error!(error = %e, "Email send failed");
                Err(AppError::DeliveryFailed)
            }
            Err(_) => {
                error!(timeout = ?self.config.smtp_timeout, "Email send timed out");
                Err(AppError::DeliveryFailed)
            }
        }
    }

    /// Rejects a foreign origin. Unreadable headers are let through.
    fn check_origin(&self, headers: &HeaderMap) -> Result<(), AppError> {
        match evaluate_origin(headers, &self.config.allowed_origins) {
            Ok(OriginDecision::Allow) => Ok(()),
            Ok(OriginDecision::Reject) => Err(AppError::ForbiddenOrigin),
            Err(e) => {
                debug!(error = %e, "Origin check skipped");
                Ok(())
            }
        }
    }

    /// Verifies the CAPTCHA token when a secret is configured. Fails closed.
    async fn verify_captcha(
        &self,
        submission: &SubmissionRequest,
        headers: &HeaderMap,
    ) -> Result<(), AppError> {
        let Some(secret) = &self.config.captcha_secret else {
            return Ok(());
        };

        let token = submission.captcha_token().ok_or(AppError::CaptchaMissing)?;

        let challenge = CaptchaChallenge {
            secret: secret.clone(),
            token: token.to_string(),
            remote_ip: forwarded_client_ip(headers),
        };

        match timeout(self.config.captcha_timeout, self.verifier.verify(&challenge)).await {
            Ok(Ok(verdict)) if verdict.success => Ok(()),
            Ok(Ok(verdict)) => {
                debug!(error_codes = ?verdict.error_codes, "Captcha rejected");
                Err(AppError::CaptchaFailed)
            }
            Ok(Err(e)) => {
                error!(error = %e, "Captcha verification unavailable");
                Err(AppError::CaptchaUnavailable)
            }
            Err(_) => {
                error!(timeout = ?self.config.captcha_timeout, "Captcha verification timed out");
                Err(AppError::CaptchaUnavailable)
            }
        }
    }
}
