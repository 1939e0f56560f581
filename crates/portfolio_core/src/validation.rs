//! Validation gate for contact-form input.
//!
//! # Responsibility
//! - Turn untrusted `ContactFormInput` into a normalized `ContactForm`.
//! - Report every field violation in one pass.
//!
//! # Invariants
//! - Rules are evaluated independently; no short-circuiting.
//! - The gate is pure: no I/O, no logging, no clock.
//! - A rejection always carries at least one `FieldError`.
//! - Lengths count UTF-16 code units, as browsers report `string.length`;
//!   input is not trimmed.

use crate::model::contact::{ContactForm, ContactFormInput};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;

// Local-part leading dot, last character and `..` are checked separately;
// the regex crate has no lookaround.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+.\-]+@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
        .expect("valid email regex")
});

/// Form field a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

/// Rule a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorCode {
    /// Field missing or `null`.
    Required,
    /// Field present but not a string.
    InvalidType,
    /// String shorter than the field minimum.
    TooSmall { min: usize },
    /// String is not email-shaped.
    InvalidEmail,
}

impl FieldErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidType => "invalid_type",
            Self::TooSmall { .. } => "too_small",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

impl Serialize for FieldErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One field-level rejection reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: ContactField,
    pub code: FieldErrorCode,
    /// Human-readable reason suitable for showing next to the form field.
    pub message: String,
}

impl FieldError {
    fn new(field: ContactField, code: FieldErrorCode) -> Self {
        let message = match (field, code) {
            (_, FieldErrorCode::Required) => "Required".to_string(),
            (_, FieldErrorCode::InvalidType) => "Expected string".to_string(),
            (ContactField::Name, FieldErrorCode::TooSmall { min }) => {
                format!("Name must be at least {min} characters")
            }
            (ContactField::Message, FieldErrorCode::TooSmall { min }) => {
                format!("Message must be at least {min} characters")
            }
            (other, FieldErrorCode::TooSmall { min }) => {
                format!("{} must be at least {min} characters", other.as_str())
            }
            (_, FieldErrorCode::InvalidEmail) => "Please enter a valid email address".to_string(),
        };
        Self {
            field,
            code,
            message,
        }
    }
}

/// Structured rejection returned by the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns whether any error names `field`.
    pub fn has_field(&self, field: ContactField) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    pub fn fields(&self) -> Vec<ContactField> {
        self.errors.iter().map(|error| error.field).collect()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid contact form:")?;
        for error in &self.errors {
            write!(f, " {}={}", error.field.as_str(), error.code.as_str())?;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

/// Validates raw contact input.
///
/// # Contract
/// - `name`: string, at least `NAME_MIN_CHARS` characters.
/// - `email`: string, email-shaped.
/// - `subject`: optional string; missing, `null` or empty becomes `None`.
/// - `message`: string, at least `MESSAGE_MIN_CHARS` characters.
///
/// # Errors
/// Returns every violation found, in field order.
pub fn validate_contact_form(input: &ContactFormInput) -> Result<ContactForm, ValidationErrors> {
    let mut errors = Vec::new();

    let name = required_string(&mut errors, ContactField::Name, input.name.as_ref());
    if let Some(value) = name {
        check_min_length(&mut errors, ContactField::Name, value, NAME_MIN_CHARS);
    }

    let email = required_string(&mut errors, ContactField::Email, input.email.as_ref());
    if let Some(value) = email {
        if !is_valid_email(value) {
            errors.push(FieldError::new(
                ContactField::Email,
                FieldErrorCode::InvalidEmail,
            ));
        }
    }

    let subject = match input.subject.as_ref() {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) if value.is_empty() => None,
        Some(Value::String(value)) => Some(value.as_str()),
        Some(_) => {
            errors.push(FieldError::new(
                ContactField::Subject,
                FieldErrorCode::InvalidType,
            ));
            None
        }
    };

    let message = required_string(&mut errors, ContactField::Message, input.message.as_ref());
    if let Some(value) = message {
        check_min_length(&mut errors, ContactField::Message, value, MESSAGE_MIN_CHARS);
    }

    match (name, email, message) {
        (Some(name), Some(email), Some(message)) if errors.is_empty() => Ok(ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.map(str::to_string),
            message: message.to_string(),
        }),
        _ => Err(ValidationErrors { errors }),
    }
}

/// Returns whether `value` is an email-shaped address.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, _)) = value.split_once('@') else {
        return false;
    };
    let ends_cleanly = local
        .chars()
        .last()
        .is_some_and(|last| last.is_ascii_alphanumeric() || matches!(last, '_' | '+' | '-'));
    if local.starts_with('.') || !ends_cleanly || value.contains("..") {
        return false;
    }
    EMAIL_RE.is_match(value)
}

fn required_string<'a>(
    errors: &mut Vec<FieldError>,
    field: ContactField,
    value: Option<&'a Value>,
) -> Option<&'a str> {
    match value {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, FieldErrorCode::Required));
            None
        }
        Some(Value::String(text)) => Some(text.as_str()),
        Some(_) => {
            errors.push(FieldError::new(field, FieldErrorCode::InvalidType));
            None
        }
    }
}

fn check_min_length(errors: &mut Vec<FieldError>, field: ContactField, value: &str, min: usize) {
    if value.encode_utf16().count() < min {
        errors.push(FieldError::new(field, FieldErrorCode::TooSmall { min }));
    }
}
