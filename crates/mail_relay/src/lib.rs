use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use shared::protocol::RelayPayload;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub use reqwest::StatusCode;

pub const DEFAULT_RELAY_URL: &str = "https://formspree.io/f/portfolio-contact";
pub const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub endpoint: Url,
    pub timeout: Duration,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("mail relay unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("mail relay rejected submission with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("failed to build mail relay client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Delivers a contact submission to the third-party mail service.
#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn deliver(&self, payload: &RelayPayload) -> Result<(), RelayError>;
}

pub struct HttpMailRelay {
    http: Client,
    endpoint: Url,
}

impl HttpMailRelay {
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RelayError::Client)?;
        Ok(Self {
            http,
            endpoint: config.endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl MailRelay for HttpMailRelay {
    async fn deliver(&self, payload: &RelayPayload) -> Result<(), RelayError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(RelayError::Unreachable)?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, endpoint = %self.endpoint, "mail relay accepted submission");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(RelayError::Rejected { status, body })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
