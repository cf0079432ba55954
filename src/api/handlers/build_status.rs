//! Handlers for the CI and deployment status endpoints.

use axum::{Json, extract::State};

use crate::api::dto::build_status::{GitHubBuildsResponse, VercelDeploymentsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the five most recent GitHub Actions runs.
///
/// # Endpoint
///
/// `GET /api/github-builds`
///
/// # Response
///
/// ```json
/// {
///   "latest": [
///     {
///       "id": 123,
///       "status": "completed",
///       "conclusion": "success",
///       "created_at": "2026-01-02T03:04:05Z",
///       "updated_at": "2026-01-02T03:09:05Z",
///       "html_url": "https://github.com/owner/repo/actions/runs/123",
///       "name": "CI",
///       "event": "push"
///     }
///   ]
/// }
/// ```
pub async fn github_builds_handler(
    State(state): State<AppState>,
) -> Result<Json<GitHubBuildsResponse>, AppError> {
    let latest = state.build_status_service.latest_runs().await?;

    Ok(Json(GitHubBuildsResponse { latest }))
}

/// Returns the five most recent Vercel deployments.
///
/// # Endpoint
///
/// `GET /api/vercel-deployment`
///
/// # Errors
///
/// - **500** `{"error": "Missing Vercel credentials"}` when not configured
/// - upstream status with `{"error": "Failed to fetch deployments"}` on API errors
pub async fn vercel_deployment_handler(
    State(state): State<AppState>,
) -> Result<Json<VercelDeploymentsResponse>, AppError> {
    let deployments = state.build_status_service.latest_deployments().await?;

    Ok(Json(VercelDeploymentsResponse { deployments }))
}
