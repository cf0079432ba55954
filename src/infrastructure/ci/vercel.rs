//! Vercel deployments REST client.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::{USER_AGENT as AGENT, map_reqwest_error};
use crate::config::VercelConfig;
use crate::domain::entities::Deployment;
use crate::domain::entities::deployment::{NO_COMMIT_MESSAGE, NO_COMMIT_SHA};
use crate::domain::gateways::{DeploymentSource, UpstreamError};

const VERCEL_API_BASE: &str = "https://api.vercel.com";

/// Lists deployments for one project, optionally scoped to a team.
pub struct VercelClient {
    client: Client,
    api_base: String,
    token: String,
    project: String,
    team: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeploymentsResponse {
    #[serde(default)]
    deployments: Vec<RawDeployment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeployment {
    url: String,
    state: Option<String>,
    #[serde(default)]
    meta: Value,
    created_at: i64,
    #[serde(default)]
    creator: Value,
    name: String,
    target: Option<String>,
}

impl From<RawDeployment> for Deployment {
    fn from(raw: RawDeployment) -> Self {
        let commit_message = Deployment::meta_str(&raw.meta, "githubCommitMessage", NO_COMMIT_MESSAGE);
        let commit_sha = Deployment::meta_str(&raw.meta, "githubCommitSha", NO_COMMIT_SHA);

        Deployment {
            url: raw.url,
            state: raw.state,
            meta: raw.meta,
            created_at: raw.created_at,
            creator: raw.creator,
            name: raw.name,
            target: raw.target,
            commit_message,
            commit_sha,
        }
    }
}

impl VercelClient {
    /// Creates a client for the configured project.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Request`] if the HTTP client cannot be built.
    pub fn new(config: &VercelConfig, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        Ok(Self {
            client,
            api_base: VERCEL_API_BASE.to_string(),
            token: config.token.clone(),
            project: config.project.clone(),
            team: config.team.clone(),
        })
    }

    fn query_params(&self, limit: usize) -> Vec<(&'static str, String)> {
        let mut params = vec![("projectId", self.project.clone())];
        if let Some(team) = &self.team {
            params.push(("teamId", team.clone()));
        }
        params.push(("limit", limit.to_string()));
        params
    }
}

#[async_trait]
impl DeploymentSource for VercelClient {
    async fn latest_deployments(&self, limit: usize) -> Result<Vec<Deployment>, UpstreamError> {
        let response = self
            .client
            .get(format!("{}/v6/deployments", self.api_base))
            .query(&self.query_params(limit))
            .bearer_auth(&self.token)
            .header(USER_AGENT, AGENT)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body: DeploymentsResponse = response.json().await.map_err(map_reqwest_error)?;

        Ok(body
            .deployments
            .into_iter()
            .take(limit)
            .map(Deployment::from)
            .collect())
    }
}
