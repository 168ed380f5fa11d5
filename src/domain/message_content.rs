use crate::domain::ValidationError;

/// Maximum length of a contact message, in characters
const MAX_MESSAGE_LENGTH: usize = 5000;

/// Free-form message body of a contact submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    /// Parse message content, keeping inner newlines untouched
    pub fn parse(message: String) -> Result<Self, ValidationError> {
        if message.trim().is_empty() {
            return Err(ValidationError::MissingField);
        }
        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ValidationError::InvalidField {
                reason: format!("message is longer than {MAX_MESSAGE_LENGTH} characters"),
            });
        }
        Ok(Self(message))
    }
}

impl AsRef<str> for MessageContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
