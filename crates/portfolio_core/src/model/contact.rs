//! Contact submission model.
//!
//! # Responsibility
//! - Carry untrusted form input (`ContactFormInput`) to the validation gate.
//! - Carry validated payloads (`ContactForm`) to the submission store.
//! - Define the stored record (`ContactSubmission`) and its wire shape.
//!
//! # Invariants
//! - `ContactForm` can only be built by `validation::validate_contact_form`.
//! - `ContactSubmission::id` is assigned by the store and never reused.
//! - `subject` serializes as an explicit `null`, never as a missing key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sequential identifier assigned by the submission store.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type SubmissionId = u64;

/// Raw contact form input as received from a caller.
///
/// Every field is an optional JSON value so that a missing key, a `null`
/// and a value of the wrong type can each be reported by the gate.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContactFormInput {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub subject: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl ContactFormInput {
    /// Builds input from plain strings, the common case for in-process callers.
    pub fn from_fields(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            email: Some(Value::String(email.into())),
            subject: subject.map(|value| Value::String(value.to_string())),
            message: Some(Value::String(message.into())),
        }
    }

    /// Extracts the four known fields from a JSON object.
    ///
    /// Returns `None` when `value` is not an object. Unknown keys are ignored.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            name: object.get("name").cloned(),
            email: object.get("email").cloned(),
            subject: object.get("subject").cloned(),
            message: object.get("message").cloned(),
        })
    }
}

/// Validated, normalized contact payload.
///
/// Fields are private; use accessors. Construction goes through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) subject: Option<String>,
    pub(crate) message: String,
}

impl ContactForm {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// `None` when the caller omitted the subject or sent an empty one.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One accepted contact-form entry as held by the submission store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: SubmissionId,
    pub name: String,
    pub email: String,
    /// Always serialized; `null` when absent.
    pub subject: Option<String>,
    pub message: String,
    /// Server clock at acceptance time.
    pub created_at: DateTime<Utc>,
}

impl ContactSubmission {
    /// Stamps a validated form with its store-assigned identity.
    pub fn from_form(id: SubmissionId, form: ContactForm, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: form.name,
            email: form.email,
            subject: form.subject,
            message: form.message,
            created_at,
        }
    }
}
