//! Gateway traits for the build status proxies.

use async_trait::async_trait;

use crate::domain::entities::{Deployment, WorkflowRun};

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The API answered with a non-success HTTP status.
    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Upstream request failed: {0}")]
    Request(String),

    #[error("Upstream response could not be decoded: {0}")]
    Decode(String),
}

/// Source of recent CI workflow runs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowRunSource: Send + Sync {
    /// Returns at most `limit` runs, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on network, status or decoding failures.
    async fn latest_runs(&self, limit: usize) -> Result<Vec<WorkflowRun>, UpstreamError>;
}

/// Source of recent deployments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeploymentSource: Send + Sync {
    /// Returns at most `limit` deployments, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on network, status or decoding failures.
    async fn latest_deployments(&self, limit: usize) -> Result<Vec<Deployment>, UpstreamError>;
}
