//! Core domain logic for the portfolio site's contact flow.
//! This crate is the single source of truth for submission invariants.

pub mod logging;
pub mod mailto;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status, LogDestination};
pub use mailto::{compose_mailto, encode_uri_component};
pub use model::contact::{ContactForm, ContactFormInput, ContactSubmission, SubmissionId};
pub use repo::contact_repo::{
    Clock, ContactRepository, InMemoryContactRepository, RepoError, RepoResult,
};
pub use service::contact_service::{ContactService, ContactServiceError};
pub use validation::{
    is_valid_email, validate_contact_form, ContactField, FieldError, FieldErrorCode,
    ValidationErrors, MESSAGE_MIN_CHARS, NAME_MIN_CHARS,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
