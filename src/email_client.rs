use std::time;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::compose::OutboundEmail;
use crate::domain::EmailAddress;

/// Client for a transactional email HTTP API
pub struct EmailClient {
    http_client: Client,
    endpoint: Url,
    sender: EmailAddress,
    authorization_token: SecretString,
}

/// Request body expected by the `/emails` endpoint
#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

impl EmailClient {
    pub fn new(
        base_url: &Url,
        sender: EmailAddress,
        authorization_token: SecretString,
        timeout: time::Duration,
    ) -> anyhow::Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        let endpoint = base_url.join("emails")?;
        Ok(Self {
            http_client,
            endpoint,
            sender,
            authorization_token,
        })
    }

    /// Send an email with a single authenticated POST, any non-2xx status is an error
    pub async fn send_email(
        &self,
        recipient: &EmailAddress,
        email: &OutboundEmail,
    ) -> Result<(), reqwest::Error> {
        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: recipient.as_ref(),
            reply_to: email.reply_to.as_ref(),
            subject: &email.subject,
            html: &email.html_body,
            text: &email.text_body,
        };
        self.http_client
            .post(self.endpoint.clone())
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
