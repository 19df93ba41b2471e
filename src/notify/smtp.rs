// src/notify/smtp.rs

use std::future::Future;
use std::pin::Pin;

use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::debug;

use crate::errors::{Result, WccError};

use super::{Mailer, Notification};

/// Delivers notifications to an SMTP relay without authentication.
///
/// STARTTLS is used when the relay advertises it, plain SMTP otherwise. The
/// relay is expected to be local, so its certificate is not verified.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
    port: u16,
}

impl SmtpMailer {
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let tls = TlsParameters::builder(host.to_string())
            .dangerous_accept_invalid_certs(true)
            .build()
            .map_err(|e| WccError::MailError(format!("cannot set up TLS for {host}: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .tls(Tls::Opportunistic(tls))
            .build();

        Ok(Self {
            transport,
            host: host.to_string(),
            port,
        })
    }

    fn build_message(notification: &Notification) -> Result<Message> {
        let from: Mailbox = notification.from.parse().map_err(|e| {
            WccError::MailError(format!("invalid sender '{}': {e}", notification.from))
        })?;
        let to: Mailbox = notification.to.parse().map_err(|e| {
            WccError::MailError(format!("invalid recipient '{}': {e}", notification.to))
        })?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(notification.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(|e| WccError::MailError(format!("cannot build message: {e}")))
    }
}

impl Mailer for SmtpMailer {
    fn send<'a>(
        &'a self,
        notification: &'a Notification,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let message = Self::build_message(notification)?;
            let response = self.transport.send(message).await.map_err(|e| {
                WccError::MailError(format!(
                    "cannot send mail via SMTP to {}:{}: {e}",
                    self.host, self.port
                ))
            })?;
            debug!(
                to = %notification.to,
                code = %response.code(),
                "relay accepted message"
            );
            Ok(())
        })
    }
}
