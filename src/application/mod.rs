//! Application layer services implementing the API's behavior.
//!
//! Services consume gateway traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::contact_service::ContactService`] - Contact form submission gate
//! - [`services::build_status_service::BuildStatusService`] - CI and deployment status proxy

pub mod services;
