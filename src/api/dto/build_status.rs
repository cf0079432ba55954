//! DTOs for the build status endpoints.

use serde::Serialize;

use crate::domain::entities::{Deployment, WorkflowRun};

/// Response for `GET /api/github-builds`.
#[derive(Debug, Serialize)]
pub struct GitHubBuildsResponse {
    pub latest: Vec<WorkflowRun>,
}

/// Response for `GET /api/vercel-deployment`.
#[derive(Debug, Serialize)]
pub struct VercelDeploymentsResponse {
    pub deployments: Vec<Deployment>,
}
