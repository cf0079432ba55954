//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and injected into the
//! services. Request handlers never read the environment.
//!
//! ## Contact gate
//!
//! ```bash
//! export ALLOWED_ORIGINS="https://portfolio.example,https://www.portfolio.example"
//! export TURNSTILE_SECRET_KEY="0x..."     # optional, enables CAPTCHA verification
//!
//! export SMTP_HOST="smtp.example.com"
//! export SMTP_PORT="465"
//! export SMTP_USER="mailer@example.com"
//! export SMTP_PASS="password"
//! export SMTP_SECURE="true"               # implied when SMTP_PORT is 465
//! export FROM_EMAIL="mailer@example.com"  # defaults to SMTP_USER
//! export CONTACT_TO_EMAIL="me@example.com"
//! ```
//!
//! If any of `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASS` is missing the
//! service still starts, but every contact submission fails with
//! "Email transport is not configured".
//!
//! ## Build status proxies
//!
//! - `GITHUB_REPO` (`owner/name`) and optional `GITHUB_PAT`
//! - `VERCEL_TOKEN`, `VERCEL_PROJECT` and optional `VERCEL_TEAM`
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Rate-limit by `X-Forwarded-For` instead of peer address
//! - `TURNSTILE_VERIFY_URL` - CAPTCHA verification endpoint
//! - `CAPTCHA_TIMEOUT_SECS`, `SMTP_TIMEOUT_SECS`, `UPSTREAM_TIMEOUT_SECS` (default: 10)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Cloudflare Turnstile server-side verification endpoint.
pub const DEFAULT_TURNSTILE_VERIFY_URL: &str =
    "https://challenges.cloudflare.com/turnstile/v0/siteverify";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub gate: GateConfig,
    pub github: Option<GitHubConfig>,
    pub vercel: Option<VercelConfig>,
    /// Timeout for the build status proxies' outbound calls.
    pub upstream_timeout: Duration,
}

/// Everything the contact gate needs, built once and passed in explicitly.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Extra origins accepted besides the request's own host and local dev servers.
    pub allowed_origins: Vec<String>,
    /// CAPTCHA secret. `None` disables verification entirely.
    pub captcha_secret: Option<String>,
    pub captcha_verify_url: String,
    pub captcha_timeout: Duration,
    /// SMTP settings. `None` when any required setting is missing.
    pub transport: Option<TransportConfig>,
    pub smtp_timeout: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            captcha_secret: None,
            captcha_verify_url: DEFAULT_TURNSTILE_VERIFY_URL.to_string(),
            captcha_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            transport: None,
            smtp_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Outbound SMTP settings.
#[derive(Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Implicit TLS (SMTPS). Otherwise STARTTLS is used when offered.
    pub use_tls: bool,
    pub from_address: String,
    /// Fixed recipient of every contact message.
    pub to_address: String,
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("use_tls", &self.use_tls)
            .field("from_address", &self.from_address)
            .field("to_address", &self.to_address)
            .finish()
    }
}

#[derive(Clone)]
pub struct GitHubConfig {
    /// Repository in `owner/name` form.
    pub repo: String,
    pub token: Option<String>,
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("repo", &self.repo)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Clone)]
pub struct VercelConfig {
    pub token: String,
    pub project: String,
    pub team: Option<String>,
}

impl fmt::Debug for VercelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VercelConfig")
            .field("token", &"***")
            .field("project", &self.project)
            .field("team", &self.team)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric setting cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let gate = Self::load_gate().context("Failed to load contact gate configuration")?;

        let github = env_non_empty("GITHUB_REPO").map(|repo| GitHubConfig {
            repo,
            token: env_non_empty("GITHUB_PAT"),
        });

        let vercel = match (env_non_empty("VERCEL_TOKEN"), env_non_empty("VERCEL_PROJECT")) {
            (Some(token), Some(project)) => Some(VercelConfig {
                token,
                project,
                team: env_non_empty("VERCEL_TEAM"),
            }),
            _ => None,
        };

        let upstream_timeout = timeout_from_env("UPSTREAM_TIMEOUT_SECS")?;

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            gate,
            github,
            vercel,
            upstream_timeout,
        })
    }

    fn load_gate() -> Result<GateConfig> {
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| parse_origin_list(&v))
            .unwrap_or_default();

        Ok(GateConfig {
            allowed_origins,
            captcha_secret: env_non_empty("TURNSTILE_SECRET_KEY"),
            captcha_verify_url: env_non_empty("TURNSTILE_VERIFY_URL")
                .unwrap_or_else(|| DEFAULT_TURNSTILE_VERIFY_URL.to_string()),
            captcha_timeout: timeout_from_env("CAPTCHA_TIMEOUT_SECS")?,
            transport: Self::load_transport()?,
            smtp_timeout: timeout_from_env("SMTP_TIMEOUT_SECS")?,
        })
    }

    /// Loads SMTP settings.
    ///
    /// Returns `Ok(None)` when any of host, port, user or password is missing;
    /// the gate reports that per request instead of refusing to start.
    fn load_transport() -> Result<Option<TransportConfig>> {
        let (Some(host), Some(port), Some(username), Some(password)) = (
            env_non_empty("SMTP_HOST"),
            env_non_empty("SMTP_PORT"),
            env_non_empty("SMTP_USER"),
            env_non_empty("SMTP_PASS"),
        ) else {
            return Ok(None);
        };

        let port: u16 = port
            .trim()
            .parse()
            .with_context(|| format!("SMTP_PORT must be a port number, got '{port}'"))?;

        let use_tls = env::var("SMTP_SECURE").is_ok_and(|v| v == "true") || port == 465;

        let from_address = env_non_empty("FROM_EMAIL").unwrap_or_else(|| username.clone());
        let to_address = env_non_empty("CONTACT_TO_EMAIL").unwrap_or_else(|| from_address.clone());

        Ok(Some(TransportConfig {
            host,
            port,
            username,
            password,
            use_tls,
            from_address,
            to_address,
        }))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - an allowed origin is not an `http`/`https` URL
    /// - the CAPTCHA verification URL is not a URL
    /// - a timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        for origin in &self.gate.allowed_origins {
            let parsed = Url::parse(origin)
                .with_context(|| format!("ALLOWED_ORIGINS entry '{origin}' is not a URL"))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                anyhow::bail!("ALLOWED_ORIGINS entry '{}' must be http or https", origin);
            }
        }

        Url::parse(&self.gate.captcha_verify_url).with_context(|| {
            format!(
                "TURNSTILE_VERIFY_URL is not a URL: '{}'",
                self.gate.captcha_verify_url
            )
        })?;

        if self.gate.captcha_timeout.is_zero()
            || self.gate.smtp_timeout.is_zero()
            || self.upstream_timeout.is_zero()
        {
            anyhow::bail!("Timeouts must be greater than 0");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Allowed origins: {:?}", self.gate.allowed_origins);

        if self.gate.captcha_secret.is_some() {
            tracing::info!("  Captcha: enabled ({})", self.gate.captcha_verify_url);
        } else {
            tracing::info!("  Captcha: disabled");
        }

        match &self.gate.transport {
            Some(t) => tracing::info!(
                "  SMTP: {}@{}:{} (tls: {})",
                mask_secret(&t.username),
                t.host,
                t.port,
                t.use_tls
            ),
            None => tracing::warn!("  SMTP: not configured, contact form will fail"),
        }

        match &self.github {
            Some(gh) => tracing::info!("  GitHub builds: {}", gh.repo),
            None => tracing::info!("  GitHub builds: disabled"),
        }

        match &self.vercel {
            Some(v) => tracing::info!("  Vercel deployments: {}", v.project),
            None => tracing::info!("  Vercel deployments: disabled"),
        }
    }
}

/// Reads a variable, treating an empty or whitespace-only value as unset.
fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn timeout_from_env(key: &str) -> Result<Duration> {
    match env_non_empty(key) {
        Some(v) => {
            let secs: u64 = v
                .trim()
                .parse()
                .with_context(|| format!("{key} must be a number of seconds, got '{v}'"))?;
            Ok(Duration::from_secs(secs))
        }
        None => Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
    }
}

/// Splits a comma-separated origin list, trimming entries and dropping empty ones.
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Masks a credential for logging, keeping only its first character.
///
/// - `mailer@example.com` → `m***`
fn mask_secret(value: &str) -> String {
    match value.chars().next() {
        Some(first) => format!("{first}***"),
        None => String::new(),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if parsing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
