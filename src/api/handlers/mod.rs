//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod build_status;
pub mod contact;
pub mod health;

pub use build_status::{github_builds_handler, vercel_deployment_handler};
pub use contact::send_email_handler;
pub use health::health_handler;
