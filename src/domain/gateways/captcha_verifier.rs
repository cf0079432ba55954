//! Gateway trait for CAPTCHA token verification.

use async_trait::async_trait;
use serde::Deserialize;

/// One verification request: the server secret, the client token, and the client IP if known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaChallenge {
    pub secret: String,
    pub token: String,
    pub remote_ip: Option<String>,
}

/// Verdict returned by the verification service.
///
/// A response without `success` counts as a failed verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CaptchaVerification {
    #[serde(default)]
    pub success: bool,

    #[serde(rename = "error-codes", default)]
    pub error_codes: Vec<String>,
}

/// The verification could not be completed.
#[derive(Debug, thiserror::Error)]
pub enum CaptchaError {
    #[error("Captcha verifier request failed: {0}")]
    Request(String),

    #[error("Captcha verifier timed out")]
    Timeout,

    #[error("Captcha verifier returned an unreadable response: {0}")]
    InvalidResponse(String),
}

/// Verifies CAPTCHA tokens against an external service.
///
/// # Implementations
///
/// - [`crate::infrastructure::captcha::TurnstileVerifier`] - Cloudflare Turnstile siteverify
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// Performs a single verification call. Never retried.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError`] on network failure, timeout, or an unreadable
    /// response. A readable "not human" verdict is `Ok` with `success == false`.
    async fn verify(&self, challenge: &CaptchaChallenge)
    -> Result<CaptchaVerification, CaptchaError>;
}
