//! HTTP server initialization and runtime setup.
//!
//! Builds the outbound clients from configuration, wires the services, and
//! runs the Axum server until a shutdown signal arrives.

use crate::application::services::{BuildStatusService, ContactService};
use crate::config::Config;
use crate::domain::gateways::{DeploymentSource, MailTransport, WorkflowRunSource};
use crate::infrastructure::captcha::TurnstileVerifier;
use crate::infrastructure::ci::{GitHubActionsClient, VercelClient};
use crate::infrastructure::mail::SmtpMailer;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Wires services from configuration.
///
/// Integrations whose settings are missing are left out; the affected
/// endpoints then report a configuration error per request.
///
/// # Errors
///
/// Returns an error if an HTTP client or the SMTP transport cannot be built
/// from the settings that are present.
pub fn build_state(config: &Config) -> Result<AppState> {
    let verifier = TurnstileVerifier::new(
        config.gate.captcha_verify_url.clone(),
        config.gate.captcha_timeout,
    )
    .context("Failed to create captcha verifier")?;

    let mailer: Option<Arc<dyn MailTransport>> = match &config.gate.transport {
        Some(transport) => Some(Arc::new(
            SmtpMailer::new(transport, config.gate.smtp_timeout)
                .context("Failed to create SMTP transport")?,
        )),
        None => {
            tracing::warn!("SMTP not configured; contact submissions will fail");
            None
        }
    };

    let contact_service = ContactService::new(config.gate.clone(), Arc::new(verifier), mailer);

    let runs: Option<Arc<dyn WorkflowRunSource>> = match &config.github {
        Some(github) => Some(Arc::new(
            GitHubActionsClient::new(github, config.upstream_timeout)
                .context("Failed to create GitHub client")?,
        )),
        None => None,
    };

    let deployments: Option<Arc<dyn DeploymentSource>> = match &config.vercel {
        Some(vercel) => Some(Arc::new(
            VercelClient::new(vercel, config.upstream_timeout)
                .context("Failed to create Vercel client")?,
        )),
        None => None,
    };

    let build_status_service = BuildStatusService::new(runs, deployments);

    Ok(AppState::new(
        Arc::new(contact_service),
        Arc::new(build_status_service),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - An outbound client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
