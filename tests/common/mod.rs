#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use portfolio_api::application::services::{BuildStatusService, ContactService};
use portfolio_api::config::GateConfig;
use portfolio_api::domain::entities::{Deployment, OutboundEmail, WorkflowRun};
use portfolio_api::domain::gateways::{
    CaptchaChallenge, CaptchaError, CaptchaVerification, CaptchaVerifier, DeploymentSource,
    MailError, MailTransport, UpstreamError, WorkflowRunSource,
};
use portfolio_api::state::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const SECRET: &str = "test-turnstile-secret";
pub const SITE_ORIGIN: &str = "https://portfolio.example";

/// How the fake verifier answers.
#[derive(Debug, Clone, Copy)]
pub enum Verdict {
    Human,
    Bot,
    Unreachable,
}

/// Captcha verifier that records every challenge it receives.
pub struct FakeVerifier {
    verdict: Verdict,
    challenges: Mutex<Vec<CaptchaChallenge>>,
}

impl FakeVerifier {
    pub fn new(verdict: Verdict) -> Self {
        Self {
            verdict,
            challenges: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.challenges.lock().unwrap().len()
    }

    pub fn challenges(&self) -> Vec<CaptchaChallenge> {
        self.challenges.lock().unwrap().clone()
    }
}

#[async_trait]
impl CaptchaVerifier for FakeVerifier {
    async fn verify(
        &self,
        challenge: &CaptchaChallenge,
    ) -> Result<CaptchaVerification, CaptchaError> {
        self.challenges.lock().unwrap().push(challenge.clone());

        match self.verdict {
            Verdict::Human => Ok(CaptchaVerification {
                success: true,
                error_codes: Vec::new(),
            }),
            Verdict::Bot => Ok(CaptchaVerification {
                success: false,
                error_codes: vec!["invalid-input-response".to_string()],
            }),
            Verdict::Unreachable => Err(CaptchaError::Request("connection refused".to_string())),
        }
    }
}

/// Mail transport that keeps sent messages in memory.
pub struct RecordingMailer {
    fail: bool,
    sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Send("421 service not available".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Test harness: the state plus handles on the fakes behind it.
pub struct TestGate {
    pub state: AppState,
    pub verifier: Arc<FakeVerifier>,
    pub mailer: Option<Arc<RecordingMailer>>,
}

impl TestGate {
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.mailer.as_ref().map(|m| m.sent()).unwrap_or_default()
    }
}

pub fn gate_config(secret: Option<&str>) -> GateConfig {
    GateConfig {
        allowed_origins: vec![SITE_ORIGIN.to_string()],
        captcha_secret: secret.map(str::to_string),
        ..GateConfig::default()
    }
}

/// Builds state with the given captcha secret, verifier behavior and mailer.
pub fn create_test_state(
    secret: Option<&str>,
    verdict: Verdict,
    mailer: Option<RecordingMailer>,
) -> TestGate {
    let verifier = Arc::new(FakeVerifier::new(verdict));
    let mailer = mailer.map(Arc::new);

    let contact_service = ContactService::new(
        gate_config(secret),
        verifier.clone(),
        mailer.clone().map(|m| m as Arc<dyn MailTransport>),
    );

    let state = AppState::new(
        Arc::new(contact_service),
        Arc::new(BuildStatusService::new(None, None)),
    );

    TestGate {
        state,
        verifier,
        mailer,
    }
}

/// Workflow run source returning a fixed list and counting calls.
pub struct StaticRuns {
    pub runs: Vec<WorkflowRun>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl WorkflowRunSource for StaticRuns {
    async fn latest_runs(&self, limit: usize) -> Result<Vec<WorkflowRun>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.runs.iter().take(limit).cloned().collect())
    }
}

/// Deployment source that always fails with the given upstream status.
pub struct FailingDeployments(pub u16);

#[async_trait]
impl DeploymentSource for FailingDeployments {
    async fn latest_deployments(&self, _limit: usize) -> Result<Vec<Deployment>, UpstreamError> {
        Err(UpstreamError::Status(self.0))
    }
}

pub fn workflow_run(id: u64) -> WorkflowRun {
    WorkflowRun {
        id,
        status: Some("completed".to_string()),
        conclusion: Some("success".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
        html_url: format!("https://github.com/octo/portfolio/actions/runs/{id}"),
        name: Some("CI".to_string()),
        event: "push".to_string(),
    }
}

pub fn create_status_state(
    runs: Option<Arc<dyn WorkflowRunSource>>,
    deployments: Option<Arc<dyn DeploymentSource>>,
) -> AppState {
    let contact = create_test_state(None, Verdict::Human, None);

    AppState::new(
        contact.state.contact_service,
        Arc::new(BuildStatusService::new(runs, deployments)),
    )
}
