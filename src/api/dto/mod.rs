//! Data Transfer Objects for API responses.
//!
//! All DTOs use Serde for JSON serialization.

pub mod build_status;
pub mod contact;
pub mod health;
