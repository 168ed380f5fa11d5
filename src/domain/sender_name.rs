use std::fmt;

use crate::domain::ValidationError;

/// Maximum length of a sender name, in characters
const MAX_NAME_LENGTH: usize = 256;

/// Name of the person submitting the contact form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderName(String);

impl SenderName {
    /// Parse sender name, surrounding whitespace is dropped
    pub fn parse(name: String) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField);
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::InvalidField {
                reason: format!("sender name is longer than {MAX_NAME_LENGTH} characters"),
            });
        }
        if name.chars().any(char::is_control) {
            return Err(ValidationError::InvalidField {
                reason: "sender name contains control characters".into(),
            });
        }
        Ok(Self(name.to_owned()))
    }
}

impl AsRef<str> for SenderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SenderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
