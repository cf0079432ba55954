//! Gateway trait definitions for outbound network calls.
//!
//! Each trait abstracts one third-party service so the application services
//! can be exercised without a network.
//!
//! - Traits define the contract for each outbound call
//! - Implementations live in `crate::infrastructure`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Gateways
//!
//! - [`CaptchaVerifier`] - Bot verification (Cloudflare Turnstile)
//! - [`MailTransport`] - Email dispatch (SMTP)
//! - [`WorkflowRunSource`] - CI runs (GitHub Actions)
//! - [`DeploymentSource`] - Deployments (Vercel)

pub mod build_sources;
pub mod captcha_verifier;
pub mod mail_transport;

pub use build_sources::{DeploymentSource, UpstreamError, WorkflowRunSource};
pub use captcha_verifier::{CaptchaChallenge, CaptchaError, CaptchaVerification, CaptchaVerifier};
pub use mail_transport::{MailError, MailTransport};

#[cfg(test)]
pub use build_sources::{MockDeploymentSource, MockWorkflowRunSource};
#[cfg(test)]
pub use captcha_verifier::MockCaptchaVerifier;
#[cfg(test)]
pub use mail_transport::MockMailTransport;
