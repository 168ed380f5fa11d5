use std::fmt;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use tracing::field::display;
use tracing::Span;

use crate::compose::OutboundEmail;
use crate::domain::{ContactSubmission, SubmissionData, ValidationError};
use crate::startup::OperatorInbox;
use crate::transport::{EmailTransport, TransportError};
use crate::utils::error_chain_fmt;

/// Reply sent when the email went out
pub const SUCCESS_MESSAGE: &str = "Email sent successfully!";

/// Reply sent for any failure past validation, the cause only goes to the logs
pub const FAILURE_MESSAGE: &str = "Failed to send email.";

/// JSON reply of the send endpoint
#[derive(Debug, serde::Serialize)]
pub struct SendReply {
    success: bool,
    message: String,
}

impl SendReply {
    fn success() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Send error type
#[derive(thiserror::Error)]
pub enum SendError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to relay the contact submission")]
    Transport(#[from] TransportError),
}

impl fmt::Debug for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SendError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let reply = match self {
            Self::Validation(e) => SendReply::failure(e.to_string()),
            Self::Transport(_) => SendReply::failure(FAILURE_MESSAGE),
        };
        HttpResponse::build(self.status_code()).json(reply)
    }
}

/// Turn a body that cannot be read as a submission into a validation failure
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error.message = %err, "Rejecting a malformed contact submission");
    let reply = SendReply::failure(ValidationError::MissingField.to_string());
    let response = HttpResponse::BadRequest().json(reply);
    InternalError::from_response(err, response).into()
}

/// Send handler, relays a contact submission to the operator inbox
#[tracing::instrument(
    name = "Relaying a contact submission",
    skip(submission, transport, inbox),
    fields(sender_name = tracing::field::Empty, sender_email = tracing::field::Empty)
)]
pub async fn send(
    submission: web::Json<SubmissionData>,
    transport: web::Data<EmailTransport>,
    inbox: web::Data<OperatorInbox>,
) -> Result<HttpResponse, SendError> {
    // Validate the submission before anything leaves the process
    let submission: ContactSubmission = submission.into_inner().try_into().map_err(|e| {
        tracing::info!(error.cause_chain = ?e, "Contact submission failed validation");
        e
    })?;
    Span::current()
        .record("sender_name", display(&submission.name))
        .record("sender_email", display(&submission.email));

    // One delivery attempt, no retry
    let email = OutboundEmail::compose(&submission);
    transport.deliver(&inbox.0, &email).await.map_err(|e| {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "Failed to deliver a contact submission"
        );
        e
    })?;

    Ok(HttpResponse::Ok().json(SendReply::success()))
}
