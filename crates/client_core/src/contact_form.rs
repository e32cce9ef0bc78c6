//! Browser-side stage of the contact pipeline.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard, PoisonError,
};

use shared::{
    domain::{ContactField, ContactResult},
    error::ContactError,
};
use tracing::{debug, info, warn};

use crate::{
    notification::NotificationPresenter,
    transport::ContactTransport,
    validation::{
        tone_on_blur, tone_on_focus, validate_submission, EmailShape, FieldTone, FormFields,
    },
};

pub const SUBMIT_LABEL: &str = "Send Message";
pub const BUSY_LABEL: &str = "Sending...";

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to send message. Please try again later.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

pub fn user_message(err: &ContactError) -> &'static str {
    match err {
        ContactError::MissingFields => MISSING_FIELDS_MESSAGE,
        ContactError::InvalidEmail => INVALID_EMAIL_MESSAGE,
        ContactError::Network(_) => NETWORK_ERROR_MESSAGE,
        ContactError::Relay(_) | ContactError::Server(_) => GENERIC_FAILURE_MESSAGE,
    }
}

/// The submit button. Disabled, with a busy label, while an attempt runs.
#[derive(Debug, Default)]
pub struct SubmitControl {
    busy: AtomicBool,
}

impl SubmitControl {
    pub fn is_disabled(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn label(&self) -> &'static str {
        if self.is_disabled() {
            BUSY_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// `None` while another attempt holds the control.
    pub fn try_begin(&self) -> Option<SubmitGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard { control: self })
    }
}

/// Re-enables the control when dropped, whichever way the attempt ended.
pub struct SubmitGuard<'a> {
    control: &'a SubmitControl,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.control.busy.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// An attempt was already in flight; nothing was dispatched.
    Ignored,
    Completed(ContactResult),
}

pub struct ContactForm<T> {
    transport: T,
    email_shape: EmailShape,
    fields: Mutex<FormFields>,
    submit: SubmitControl,
    notifications: NotificationPresenter,
}

impl<T: ContactTransport> ContactForm<T> {
    pub fn new(transport: T, notifications: NotificationPresenter) -> Self {
        Self::with_email_shape(transport, notifications, EmailShape::default())
    }

    pub fn with_email_shape(
        transport: T,
        notifications: NotificationPresenter,
        email_shape: EmailShape,
    ) -> Self {
        Self {
            transport,
            email_shape,
            fields: Mutex::default(),
            submit: SubmitControl::default(),
            notifications,
        }
    }

    pub fn set_field(&self, field: ContactField, value: impl Into<String>) {
        self.lock_fields().set(field, value);
    }

    pub fn fields(&self) -> FormFields {
        self.lock_fields().clone()
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    pub fn notifications(&self) -> &NotificationPresenter {
        &self.notifications
    }

    pub fn focus(&self, _field: ContactField) -> FieldTone {
        tone_on_focus()
    }

    pub fn blur(&self, field: ContactField) -> FieldTone {
        let fields = self.lock_fields();
        tone_on_blur(field, fields.get(field), &self.email_shape)
    }

    /// Runs one attempt: validate, send, map the reply, notify.
    ///
    /// The form is cleared only on success. The submit control is released
    /// on every path, including a future dropped mid-request.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = self.submit.try_begin() else {
            debug!("submission already in flight; ignoring");
            return SubmitOutcome::Ignored;
        };

        let result = self.attempt().await;
        self.notifications.show(result.text(), result.kind());
        SubmitOutcome::Completed(result)
    }

    async fn attempt(&self) -> ContactResult {
        let snapshot = self.fields();
        let request = match validate_submission(&snapshot, &self.email_shape) {
            Ok(request) => request,
            Err(err) => {
                debug!(%err, "contact form failed validation");
                return ContactResult::Error(user_message(&err).to_string());
            }
        };

        match self.transport.submit(&request).await {
            Err(err) => {
                warn!(%err, "contact request did not reach the server");
                let err = ContactError::Network(err.to_string());
                ContactResult::Error(user_message(&err).to_string())
            }
            Ok(reply) if reply.is_success() => {
                info!("contact message accepted");
                self.lock_fields().clear();
                ContactResult::Success(SUCCESS_MESSAGE.to_string())
            }
            Ok(reply) => {
                warn!(status = %reply.status, "contact endpoint reported failure");
                ContactResult::Error(
                    reply
                        .body
                        .error
                        .filter(|message| !message.trim().is_empty())
                        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
                )
            }
        }
    }

    fn lock_fields(&self) -> MutexGuard<'_, FormFields> {
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "tests/contact_form_tests.rs"]
mod tests;
