use crate::domain::{EmailAddress, MessageContent, SenderName};

/// Reasons for rejecting a contact submission before anything is sent
///
/// The `Display` output is returned to the caller as is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingField,
    #[error("Please provide a valid name, email and message.")]
    InvalidField { reason: String },
}

/// Contact form payload as it arrives on the wire, before validation
#[derive(Debug, Default, serde::Deserialize)]
pub struct SubmissionData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Validated contact submission
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: SenderName,
    pub email: EmailAddress,
    pub message: MessageContent,
}

impl TryFrom<SubmissionData> for ContactSubmission {
    type Error = ValidationError;

    fn try_from(value: SubmissionData) -> Result<Self, Self::Error> {
        let (Some(name), Some(email), Some(message)) = (value.name, value.email, value.message)
        else {
            return Err(ValidationError::MissingField);
        };

        // Absent fields take precedence over malformed ones
        if [&name, &email, &message]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ValidationError::MissingField);
        }

        let name = SenderName::parse(name)?;
        let email = EmailAddress::parse(email.trim().to_owned())
            .map_err(|reason| ValidationError::InvalidField { reason })?;
        let message = MessageContent::parse(message)?;
        Ok(Self {
            name,
            email,
            message,
        })
    }
}
