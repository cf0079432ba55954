//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{BuildStatusService, ContactService};

/// Services shared by all handlers. Cheap to clone.
///
/// Holds no per-request or mutable data; each contact submission is handled
/// independently.
#[derive(Clone)]
pub struct AppState {
    pub contact_service: Arc<ContactService>,
    pub build_status_service: Arc<BuildStatusService>,
}

impl AppState {
    pub fn new(
        contact_service: Arc<ContactService>,
        build_status_service: Arc<BuildStatusService>,
    ) -> Self {
        Self {
            contact_service,
            build_status_service,
        }
    }
}
