use serde::{Deserialize, Serialize};

use crate::error::ContactError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

/// A contact submission whose fields are all present and non-blank.
///
/// Values are stored trimmed. There are no setters; a request is discarded
/// once the pipeline that built it completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRequest {
    name: String,
    email: String,
    message: String,
}

impl ContactRequest {
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        message: impl AsRef<str>,
    ) -> Result<Self, ContactError> {
        let name = name.as_ref().trim();
        let email = email.as_ref().trim();
        let message = message.as_ref().trim();
        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ContactError::MissingFields);
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Outcome of one submission attempt, consumed by the notification presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactResult {
    Success(String),
    Error(String),
}

impl ContactResult {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Success(_) => NotificationKind::Success,
            Self::Error(_) => NotificationKind::Error,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
