use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    MissingFields,
    InvalidEmail,
    NetworkError,
    RelayFailure,
    ServerError,
    NotFound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("one or more required fields are empty")]
    MissingFields,
    #[error("email address is malformed")]
    InvalidEmail,
    #[error("network error: {0}")]
    Network(String),
    #[error("mail relay failure: {0}")]
    Relay(String),
    #[error("server error: {0}")]
    Server(String),
}

impl ContactError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingFields => ErrorCode::MissingFields,
            Self::InvalidEmail => ErrorCode::InvalidEmail,
            Self::Network(_) => ErrorCode::NetworkError,
            Self::Relay(_) => ErrorCode::RelayFailure,
            Self::Server(_) => ErrorCode::ServerError,
        }
    }
}

impl From<ContactError> for ApiError {
    fn from(value: ContactError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
