use std::time;

use anyhow::Context;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::compose::OutboundEmail;
use crate::domain::EmailAddress;
use crate::transport::TransportError;

/// Authenticated SMTP submission through a STARTTLS relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    pub fn new(
        host: &str,
        port: u16,
        credentials: Credentials,
        sender: &EmailAddress,
        timeout: time::Duration,
    ) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .with_context(|| format!("Failed to set up an SMTP relay for {host}"))?
            .port(port)
            .credentials(credentials)
            .timeout(Some(timeout))
            .build();
        let sender = sender
            .as_ref()
            .parse()
            .context("Failed to use the sender address as a mailbox")?;
        Ok(Self { transport, sender })
    }

    /// Send an email within a single SMTP session
    pub async fn send_email(
        &self,
        recipient: &EmailAddress,
        email: &OutboundEmail,
    ) -> Result<(), TransportError> {
        let message = self
            .build_message(recipient, email)
            .map_err(TransportError::Message)?;
        // Negative replies from the server surface as errors too
        self.transport
            .send(message)
            .await
            .map_err(TransportError::Smtp)?;
        Ok(())
    }

    /// Build a multipart message with both the plain text and the HTML body
    fn build_message(
        &self,
        recipient: &EmailAddress,
        email: &OutboundEmail,
    ) -> anyhow::Result<Message> {
        let to: Mailbox = recipient
            .as_ref()
            .parse()
            .context("Failed to use the recipient address as a mailbox")?;
        let reply_to: Mailbox = email
            .reply_to
            .as_ref()
            .parse()
            .context("Failed to use the reply-to address as a mailbox")?;
        Message::builder()
            .from(self.sender.clone())
            .to(to)
            .reply_to(reply_to)
            .subject(&email.subject)
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))
            .context("Failed to build the email message")
    }
}
