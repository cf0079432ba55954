//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`SubmissionRequest`] - Untrusted contact form payload
//! - [`SanitizedMessage`] - Cleaned, validated form fields
//! - [`OutboundEmail`] - The single email a valid submission produces
//! - [`OriginContext`] - Inputs for the best-effort origin check
//! - [`DeliveryOutcome`] - Terminal result of the contact gate
//! - [`WorkflowRun`] / [`Deployment`] - Build status projections

pub mod deployment;
pub mod origin;
pub mod outcome;
pub mod submission;
pub mod workflow_run;

pub use deployment::Deployment;
pub use origin::{OriginContext, OriginDecision, OriginParseError};
pub use outcome::{Acceptance, DeliveryOutcome};
pub use submission::{OutboundEmail, SanitizedMessage, SubmissionRequest};
pub use workflow_run::WorkflowRun;
