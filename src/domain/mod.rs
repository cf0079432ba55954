//! Domain layer containing the contact gate's data model and outbound contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Request-scoped data structures (submissions, origins, outcomes)
//!   and the build status projections
//! - [`gateways`] - Trait definitions for every outbound network call
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure
//! - Gateway traits define contracts implemented by [`crate::infrastructure`]
//! - Orchestration lives in [`crate::application::services`]
//!
//! Nothing in this layer outlives a single request.

pub mod entities;
pub mod gateways;
