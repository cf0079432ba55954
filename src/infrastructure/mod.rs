//! Infrastructure layer for external integrations.
//!
//! This layer implements the gateway traits defined by the domain layer using
//! real network clients.
//!
//! # Modules
//!
//! - [`captcha`] - Cloudflare Turnstile verification over `reqwest`
//! - [`mail`] - SMTP delivery over `lettre`
//! - [`ci`] - GitHub Actions and Vercel API clients over `reqwest`

pub mod captcha;
pub mod ci;
pub mod mail;
