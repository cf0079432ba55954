//! GitHub Actions REST client.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;

use super::{USER_AGENT as AGENT, map_reqwest_error};
use crate::config::GitHubConfig;
use crate::domain::entities::WorkflowRun;
use crate::domain::gateways::{UpstreamError, WorkflowRunSource};

const GITHUB_API_BASE: &str = "https://api.github.com";

/// Lists workflow runs for a single repository.
pub struct GitHubActionsClient {
    client: Client,
    api_base: String,
    repo: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorkflowRunsResponse {
    #[serde(default)]
    workflow_runs: Vec<WorkflowRun>,
}

impl GitHubActionsClient {
    /// Creates a client for the configured repository.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Request`] if the HTTP client cannot be built.
    pub fn new(config: &GitHubConfig, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        Ok(Self {
            client,
            api_base: GITHUB_API_BASE.to_string(),
            repo: config.repo.clone(),
            token: config.token.clone(),
        })
    }

    fn runs_url(&self) -> String {
        format!("{}/repos/{}/actions/runs", self.api_base, self.repo)
    }
}

#[async_trait]
impl WorkflowRunSource for GitHubActionsClient {
    async fn latest_runs(&self, limit: usize) -> Result<Vec<WorkflowRun>, UpstreamError> {
        let mut request = self
            .client
            .get(self.runs_url())
            .query(&[("per_page", limit)])
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, AGENT);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body: WorkflowRunsResponse = response.json().await.map_err(map_reqwest_error)?;

        Ok(body.workflow_runs.into_iter().take(limit).collect())
    }
}
