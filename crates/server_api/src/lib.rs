use std::sync::Arc;

use mail_relay::MailRelay;
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{ContactAccepted, ContactPayload, RelayPayload},
};
use tracing::{error, info, warn};

pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required";
pub const SENT_MESSAGE: &str = "Message sent successfully";
pub const RELAY_FAILURE_MESSAGE: &str = "Failed to send message";

#[derive(Clone)]
pub struct ApiContext {
    pub relay: Arc<dyn MailRelay>,
}

impl ApiContext {
    pub fn new(relay: Arc<dyn MailRelay>) -> Self {
        Self { relay }
    }
}

/// Server stage of the contact pipeline.
///
/// Re-validates the payload regardless of what the browser checked, forwards
/// it to the relay and maps the outcome. Relay detail is logged here and
/// never returned to the caller.
pub async fn submit_contact(
    ctx: &ApiContext,
    payload: ContactPayload,
) -> Result<ContactAccepted, ApiError> {
    let request = payload.into_request().map_err(|err| {
        warn!(%err, "rejecting contact submission");
        ApiError::new(ErrorCode::MissingFields, MISSING_FIELDS_MESSAGE)
    })?;

    let relay_payload = RelayPayload::from_request(&request);
    if let Err(err) = ctx.relay.deliver(&relay_payload).await {
        error!(error = %err, sender = %request.email(), "mail relay delivery failed");
        return Err(ApiError::new(ErrorCode::RelayFailure, RELAY_FAILURE_MESSAGE));
    }

    info!(sender = %request.email(), "contact submission relayed");
    Ok(ContactAccepted {
        success: true,
        message: SENT_MESSAGE.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
