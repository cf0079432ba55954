//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health with the configuration status of each integration.
///
/// # Endpoint
///
/// `GET /health`
///
/// Never calls the network. Status is `degraded` when the mail transport is
/// not configured, because the contact form cannot work without it.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "captcha": { "status": "ok" },
///     "mail_transport": { "status": "ok" },
///     "github": { "status": "disabled", "message": "GITHUB_REPO not set" },
///     "vercel": { "status": "ok" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let contact = &state.contact_service;
    let builds = &state.build_status_service;

    let mail_ok = contact.transport_configured();

    Json(HealthResponse {
        status: if mail_ok { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            captcha: check(
                contact.captcha_enabled(),
                "TURNSTILE_SECRET_KEY not set, verification skipped",
            ),
            mail_transport: if mail_ok {
                ok()
            } else {
                CheckStatus {
                    status: "error".to_string(),
                    message: Some("SMTP settings incomplete".to_string()),
                }
            },
            github: check(builds.github_configured(), "GITHUB_REPO not set"),
            vercel: check(
                builds.vercel_configured(),
                "VERCEL_TOKEN or VERCEL_PROJECT not set",
            ),
        },
    })
}

fn ok() -> CheckStatus {
    CheckStatus {
        status: "ok".to_string(),
        message: None,
    }
}

fn check(enabled: bool, disabled_reason: &str) -> CheckStatus {
    if enabled {
        ok()
    } else {
        CheckStatus {
            status: "disabled".to_string(),
            message: Some(disabled_reason.to_string()),
        }
    }
}
