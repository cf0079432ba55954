//! SMTP delivery via `lettre`.

use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::TransportConfig;
use crate::domain::entities::OutboundEmail;
use crate::domain::gateways::{MailError, MailTransport};

/// Sends contact emails through an authenticated SMTP relay.
///
/// With `use_tls` the connection is wrapped in TLS from the start (SMTPS,
/// usually port 465). Otherwise STARTTLS is used when the server offers it.
/// No connection is opened until the first send.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    /// Builds the transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::InvalidAddress`] if the sender or recipient cannot be
    /// parsed, or [`MailError::Build`] if TLS parameters cannot be created.
    pub fn new(config: &TransportConfig, timeout: Duration) -> Result<Self, MailError> {
        let from = parse_mailbox(&config.from_address)?;
        let to = parse_mailbox(&config.to_address)?;

        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| MailError::Build(e.to_string()))?
        } else {
            let tls = TlsParameters::new(config.host.clone())
                .map_err(|e| MailError::Build(e.to_string()))?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .tls(Tls::Opportunistic(tls))
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(timeout))
            .build();

        info!(
            "SMTP transport ready: {}:{} (tls: {})",
            config.host, config.port, config.use_tls
        );

        Ok(Self { transport, from, to })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| MailError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Assembles the plain-text message with a fixed sender and recipient.
fn build_message(from: &Mailbox, to: &Mailbox, email: &OutboundEmail) -> Result<Message, MailError> {
    let reply_to = parse_mailbox(&email.reply_to)?;

    Message::builder()
        .from(from.clone())
        .to(to.clone())
        .reply_to(reply_to)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = build_message(&self.from, &self.to, email)?;

        let response = self.transport.send(message).await.map_err(|e| {
            if e.is_timeout() {
                MailError::Timeout
            } else {
                MailError::Send(e.to_string())
            }
        })?;

        debug!(code = %response.code(), "SMTP server accepted message");
        Ok(())
    }
}
