//! SMTP notifier implementation.

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use signet_core::error::{SignetError, SignetResult};
use signet_core::notify::Notifier;
use tracing::info;

use crate::error::MailError;
use crate::template;

/// Configuration for the SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// Relay hostname (e.g., `smtp.example.com`).
    pub host: String,
    /// Submission port (default: 587).
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Mailbox used as the `From` header,
    /// e.g. `SIGNET <no-reply@example.com>`.
    pub from: String,
    /// Minutes quoted in the email body. Keep in sync with the
    /// verification code TTL configured for the auth service.
    pub code_ttl_minutes: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 587,
            username: String::new(),
            password: String::new(),
            from: "SIGNET <no-reply@localhost>".into(),
            code_ttl_minutes: 60,
        }
    }
}

/// SMTP implementation of [`Notifier`].
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    code_ttl_minutes: u64,
}

impl SmtpNotifier {
    /// Build a TLS-required relay transport from the configuration.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let from = config.from.parse::<Mailbox>()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .port(config.port)
            .build();

        Ok(Self {
            transport,
            from,
            code_ttl_minutes: config.code_ttl_minutes,
        })
    }

    async fn deliver(&self, email: &str, display_name: &str, code: &str) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(email.parse()?)
            .subject(template::SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(template::verification_body(
                display_name,
                code,
                self.code_ttl_minutes,
            ))?;

        // One attempt only; the caller decides what a failure means.
        self.transport.send(message).await?;
        Ok(())
    }
}

impl Notifier for SmtpNotifier {
    async fn send_verification_code(
        &self,
        email: &str,
        display_name: &str,
        code: &str,
    ) -> SignetResult<()> {
        self.deliver(email, display_name, code)
            .await
            .map_err(SignetError::from)?;
        info!(email, "verification code sent");
        Ok(())
    }
}
