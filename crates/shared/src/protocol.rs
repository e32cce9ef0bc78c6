use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{domain::ContactRequest, error::ContactError};

pub fn contact_route() -> &'static str {
    "/api/contact"
}

pub fn health_route() -> &'static str {
    "/health"
}

/// Inbound body of `POST /api/contact`.
///
/// Every field is optional on the wire so the server stage can answer an
/// incomplete body with its own message instead of a deserializer rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ContactPayload {
    pub fn into_request(self) -> Result<ContactRequest, ContactError> {
        match (self.name, self.email, self.message) {
            (Some(name), Some(email), Some(message)) => ContactRequest::new(name, email, message),
            _ => Err(ContactError::MissingFields),
        }
    }
}

impl From<&ContactRequest> for ContactPayload {
    fn from(request: &ContactRequest) -> Self {
        Self {
            name: Some(request.name().to_string()),
            email: Some(request.email().to_string()),
            message: Some(request.message().to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactAccepted {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Any body the contact endpoint may answer with, as read by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body forwarded to the mail relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(rename = "_subject")]
    pub subject: String,
}

impl RelayPayload {
    pub fn from_request(request: &ContactRequest) -> Self {
        Self {
            name: request.name().to_string(),
            email: request.email().to_string(),
            message: request.message().to_string(),
            subject: format!("New portfolio message from {}", request.name()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
