use std::fmt;

use lettre::transport::smtp::authentication::Credentials;
use secrecy::ExposeSecret;

use crate::compose::OutboundEmail;
use crate::configuration::{EmailSettings, TransportKind};
use crate::domain::EmailAddress;
use crate::email_client::EmailClient;
use crate::smtp_mailer::SmtpMailer;
use crate::utils::error_chain_fmt;

/// Outbound email transport, chosen once at startup
pub enum EmailTransport {
    Api(EmailClient),
    Smtp(SmtpMailer),
}

/// Delivery failure, the detail is for the logs only
#[derive(thiserror::Error)]
pub enum TransportError {
    #[error("The email API request failed")]
    Api(#[source] reqwest::Error),
    #[error("The SMTP session failed")]
    Smtp(#[source] lettre::transport::smtp::Error),
    #[error("Failed to prepare the outbound message")]
    Message(#[source] anyhow::Error),
}

impl fmt::Debug for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl EmailTransport {
    /// Build the configured transport
    pub fn from_settings(settings: &EmailSettings) -> anyhow::Result<Self> {
        let sender = settings.sender_email().map_err(anyhow::Error::msg)?;
        let transport = match settings.transport {
            TransportKind::Api => Self::Api(EmailClient::new(
                &settings.api.base_url()?,
                sender,
                settings.api.authorization_token.clone(),
                settings.timeout(),
            )?),
            TransportKind::Smtp => Self::Smtp(SmtpMailer::new(
                &settings.smtp.host,
                settings.smtp.port,
                Credentials::new(
                    settings.smtp.username.clone(),
                    settings.smtp.password.expose_secret().to_owned(),
                ),
                &sender,
                settings.timeout(),
            )?),
        };
        Ok(transport)
    }

    /// Short name of the transport, for logging purposes
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Api(_) => "api",
            Self::Smtp(_) => "smtp",
        }
    }

    /// Make exactly one delivery attempt
    #[tracing::instrument(
        name = "Delivering email",
        skip(self, recipient, email),
        fields(transport = self.kind())
    )]
    pub async fn deliver(
        &self,
        recipient: &EmailAddress,
        email: &OutboundEmail,
    ) -> Result<(), TransportError> {
        match self {
            Self::Api(client) => client
                .send_email(recipient, email)
                .await
                .map_err(TransportError::Api),
            Self::Smtp(mailer) => mailer.send_email(recipient, email).await,
        }
    }
}
