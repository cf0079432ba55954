//! Business logic services for the application layer.

pub mod build_status_service;
pub mod contact_service;

pub use build_status_service::BuildStatusService;
pub use contact_service::{ContactRequest, ContactService};
