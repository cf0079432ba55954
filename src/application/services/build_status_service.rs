//! CI and deployment status for the portfolio's DevOps dashboard.

use std::sync::Arc;

use tracing::error;

use crate::domain::entities::{Deployment, WorkflowRun};
use crate::domain::gateways::{DeploymentSource, UpstreamError, WorkflowRunSource};
use crate::error::AppError;

/// Number of entries returned by each status endpoint.
pub const STATUS_LIMIT: usize = 5;

/// Proxies the CI and deployment APIs using server-held credentials.
///
/// Either source may be absent when its credentials are not configured; the
/// corresponding call then fails with [`AppError::NotConfigured`].
pub struct BuildStatusService {
    runs: Option<Arc<dyn WorkflowRunSource>>,
    deployments: Option<Arc<dyn DeploymentSource>>,
}

impl BuildStatusService {
    pub fn new(
        runs: Option<Arc<dyn WorkflowRunSource>>,
        deployments: Option<Arc<dyn DeploymentSource>>,
    ) -> Self {
        Self { runs, deployments }
    }

    /// Returns the latest workflow runs, newest first.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotConfigured`] without a GitHub repository
    /// - [`AppError::UpstreamStatus`] / [`AppError::UpstreamUnavailable`] on API failures
    pub async fn latest_runs(&self) -> Result<Vec<WorkflowRun>, AppError> {
        let source = self
            .runs
            .as_ref()
            .ok_or(AppError::NotConfigured("Missing GitHub configuration"))?;

        source
            .latest_runs(STATUS_LIMIT)
            .await
            .map_err(|e| map_upstream_error("GitHub", "Failed to fetch workflow runs", e))
    }

    /// Returns the latest deployments, newest first.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotConfigured`] without Vercel credentials
    /// - [`AppError::UpstreamStatus`] with the upstream status on non-2xx responses
    /// - [`AppError::UpstreamUnavailable`] on network or decoding failures
    pub async fn latest_deployments(&self) -> Result<Vec<Deployment>, AppError> {
        let source = self
            .deployments
            .as_ref()
            .ok_or(AppError::NotConfigured("Missing Vercel credentials"))?;

        source
            .latest_deployments(STATUS_LIMIT)
            .await
            .map_err(|e| map_upstream_error("Vercel", "Failed to fetch deployments", e))
    }

    pub fn github_configured(&self) -> bool {
        self.runs.is_some()
    }

    pub fn vercel_configured(&self) -> bool {
        self.deployments.is_some()
    }
}

fn map_upstream_error(provider: &str, message: &'static str, e: UpstreamError) -> AppError {
    error!(provider, error = %e, "Build status request failed");

    match e {
        UpstreamError::Status(status) => AppError::UpstreamStatus { status, message },
        UpstreamError::Request(_) | UpstreamError::Decode(_) => AppError::UpstreamUnavailable,
    }
}
