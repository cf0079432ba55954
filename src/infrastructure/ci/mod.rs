//! Build status API clients.
//!
//! - [`GitHubActionsClient`] - workflow runs for one repository
//! - [`VercelClient`] - deployments for one project

mod github;
mod vercel;

pub use github::GitHubActionsClient;
pub use vercel::VercelClient;

use crate::domain::gateways::UpstreamError;

/// User agent sent on every outbound API call. GitHub rejects requests without one.
pub(crate) const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub(crate) fn map_reqwest_error(e: reqwest::Error) -> UpstreamError {
    if e.is_decode() {
        UpstreamError::Decode(e.to_string())
    } else {
        UpstreamError::Request(e.to_string())
    }
}
