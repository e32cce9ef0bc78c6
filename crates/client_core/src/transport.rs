use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::ContactRequest,
    protocol::{contact_route, ContactPayload, ContactReply},
};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("contact request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// What came back from the contact endpoint, if anything did.
#[derive(Debug, Clone)]
pub struct ServerReply {
    pub status: StatusCode,
    pub body: ContactReply,
}

impl ServerReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success() && self.body.success
    }
}

#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn submit(&self, request: &ContactRequest) -> Result<ServerReply, TransportError>;
}

pub struct HttpContactTransport {
    http: Client,
    endpoint: String,
}

impl HttpContactTransport {
    pub fn new(server_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(server_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(server_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}{}", server_url.trim_end_matches('/'), contact_route()),
        })
    }
}

#[async_trait]
impl ContactTransport for HttpContactTransport {
    async fn submit(&self, request: &ContactRequest) -> Result<ServerReply, TransportError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&ContactPayload::from(request))
            .send()
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice::<ContactReply>(&bytes).unwrap_or_else(|err| {
            debug!(%status, %err, "contact endpoint returned a non-JSON body");
            ContactReply::default()
        });
        Ok(ServerReply { status, body })
    }
}
