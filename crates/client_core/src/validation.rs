use std::sync::LazyLock;

use regex::Regex;
use shared::{
    domain::{ContactField, ContactRequest},
    error::ContactError,
};

/// `local@domain.tld`: no part is empty or contains whitespace or `@`.
pub const DEFAULT_EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static DEFAULT_EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_EMAIL_PATTERN).expect("default email pattern compiles"));

/// Advisory email shape check. Only the browser-side stage applies it.
#[derive(Debug, Clone)]
pub struct EmailShape {
    pattern: Regex,
}

impl EmailShape {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn matches(&self, email: &str) -> bool {
        self.pattern.is_match(email.trim())
    }
}

impl Default for EmailShape {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_EMAIL_SHAPE.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

/// Checks required fields first, then the email shape; the first failure wins.
pub fn validate_submission(
    fields: &FormFields,
    email_shape: &EmailShape,
) -> Result<ContactRequest, ContactError> {
    let request = ContactRequest::new(&fields.name, &fields.email, &fields.message)?;
    if !email_shape.matches(request.email()) {
        return Err(ContactError::InvalidEmail);
    }
    Ok(request)
}

/// Color cue applied to an input as it gains or loses focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTone {
    /// Neutral highlight while the input has focus.
    Focused,
    Valid,
    Invalid,
    /// Leave the current styling alone.
    Unchanged,
}

pub fn tone_on_focus() -> FieldTone {
    FieldTone::Focused
}

pub fn tone_on_blur(field: ContactField, value: &str, email_shape: &EmailShape) -> FieldTone {
    let value = value.trim();
    if value.is_empty() {
        return FieldTone::Invalid;
    }
    match field {
        ContactField::Email if !email_shape.matches(value) => FieldTone::Unchanged,
        _ => FieldTone::Valid,
    }
}
