//! API route configuration.

use crate::api::handlers::{github_builds_handler, send_email_handler, vercel_deployment_handler};
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{any, get},
};

/// Hard cap on bytes read from a contact request.
///
/// Bodies past this cap are not buffered. The gate still runs its method,
/// origin and content-type checks on them before answering 413.
const CONTACT_READ_LIMIT: usize = 64 * 1024;

/// Contact form route.
///
/// # Endpoints
///
/// - `ANY /send-email` - Contact form gate (only `POST` succeeds)
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/send-email", any(send_email_handler))
        .layer(DefaultBodyLimit::max(CONTACT_READ_LIMIT))
}

/// Build status routes.
///
/// # Endpoints
///
/// - `GET /github-builds`     - Latest GitHub Actions runs
/// - `GET /vercel-deployment` - Latest Vercel deployments
pub fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/github-builds", get(github_builds_handler))
        .route("/vercel-deployment", get(vercel_deployment_handler))
}
