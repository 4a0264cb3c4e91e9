use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use super::sender::DeliveryError;
use crate::config::SmtpOptions;

/// Outbound mail collaborator for contact-form messages.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError>;
}

/// Sends plain-text mail through an authenticated STARTTLS relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(options: SmtpOptions) -> Result<Self, DeliveryError> {
        let from = options
            .username
            .parse::<Mailbox>()
            .map_err(|e| DeliveryError::Transport(format!("invalid sender address: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&options.server)
            .map_err(|e| DeliveryError::Transport(e.to_string()))?
            .port(options.port)
            .credentials(Credentials::new(options.username, options.password))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| DeliveryError::Transport(format!("invalid recipient address: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        debug!(code = %response.code(), "Mail accepted by relay");
        Ok(())
    }
}

/// Used when no SMTP relay is configured; the mail only reaches the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        info!(to, subject, body, "SMTP not configured, mail logged only");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smtp_mailer_rejects_a_malformed_sender() {
        let options = SmtpOptions {
            server: "smtp.example.com".into(),
            port: 587,
            username: "not an address".into(),
            password: "secret".into(),
        };
        assert!(matches!(SmtpMailer::new(options), Err(DeliveryError::Transport(_))));
    }
}
