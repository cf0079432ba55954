//! # Portfolio API
//!
//! Server side of a personal portfolio site, built with Axum: a hardened
//! contact form gate plus small proxies for CI and deployment status.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Request-scoped entities and gateway traits
//! - **Application Layer** ([`application`]) - The contact gate and status proxy services
//! - **Infrastructure Layer** ([`infrastructure`]) - Turnstile, SMTP, GitHub and Vercel clients
//! - **API Layer** ([`api`]) - Handlers, DTOs, and middleware
//!
//! ## Contact Gate
//!
//! `POST /api/send-email` runs a fixed sequence of checks (method, origin,
//! content type, size, honeypot, CAPTCHA, sanitization, length) before a
//! single email is sent. See [`application::services::ContactService`].
//!
//! ## Quick Start
//!
//! ```bash
//! export SMTP_HOST="smtp.example.com" SMTP_PORT="465" SMTP_USER="me" SMTP_PASS="..."
//! export TURNSTILE_SECRET_KEY="0x..."   # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{BuildStatusService, ContactRequest, ContactService};
    pub use crate::config::{GateConfig, TransportConfig};
    pub use crate::domain::entities::{DeliveryOutcome, OutboundEmail, SanitizedMessage};
    pub use crate::domain::gateways::{CaptchaVerifier, MailTransport};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
