//! Cloudflare Turnstile server-side verification.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::domain::gateways::{CaptchaChallenge, CaptchaError, CaptchaVerification, CaptchaVerifier};

/// Verifies Turnstile tokens with a single form-encoded POST to siteverify.
///
/// The client carries a request timeout, so a hung verifier surfaces as
/// [`CaptchaError::Timeout`] instead of holding the request open.
pub struct TurnstileVerifier {
    client: Client,
    verify_url: String,
}

impl TurnstileVerifier {
    /// Creates a verifier for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError::Request`] if the HTTP client cannot be built.
    pub fn new(verify_url: impl Into<String>, timeout: Duration) -> Result<Self, CaptchaError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CaptchaError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            verify_url: verify_url.into(),
        })
    }
}

/// Form fields for siteverify. `remoteip` is sent only when known.
fn verification_form(challenge: &CaptchaChallenge) -> Vec<(&'static str, &str)> {
    let mut form = vec![
        ("secret", challenge.secret.as_str()),
        ("response", challenge.token.as_str()),
    ];
    if let Some(ip) = challenge.remote_ip.as_deref() {
        form.push(("remoteip", ip));
    }
    form
}

fn map_request_error(e: reqwest::Error) -> CaptchaError {
    if e.is_timeout() {
        CaptchaError::Timeout
    } else {
        CaptchaError::Request(e.to_string())
    }
}

#[async_trait]
impl CaptchaVerifier for TurnstileVerifier {
    async fn verify(
        &self,
        challenge: &CaptchaChallenge,
    ) -> Result<CaptchaVerification, CaptchaError> {
        let response = self
            .client
            .post(&self.verify_url)
            .form(&verification_form(challenge))
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        let verification = response.json::<CaptchaVerification>().await.map_err(|e| {
            if e.is_timeout() {
                CaptchaError::Timeout
            } else {
                CaptchaError::InvalidResponse(format!("status {}: {}", status, e))
            }
        })?;

        debug!(
            success = verification.success,
            error_codes = ?verification.error_codes,
            "Turnstile verification completed"
        );

        Ok(verification)
    }
}
