//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Configuration status for each outbound integration.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub captcha: CheckStatus,
    pub mail_transport: CheckStatus,
    pub github: CheckStatus,
    pub vercel: CheckStatus,
}

/// Individual component status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
