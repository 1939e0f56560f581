//! Contact submission use-case service.
//!
//! # Responsibility
//! - Run the validate-then-store flow for one submission.
//! - Expose read-back APIs over the submission store.
//!
//! # Invariants
//! - Input that fails the gate never reaches the repository.
//! - Log events carry ids and counts only, never form contents.
//! - Store failures are returned, not logged here.

use crate::model::contact::{ContactFormInput, ContactSubmission, SubmissionId};
use crate::repo::contact_repo::{ContactRepository, RepoError, RepoResult};
use crate::validation::{validate_contact_form, ValidationErrors};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ContactServiceError {
    /// Input rejected by the gate.
    Invalid(ValidationErrors),
    /// Unexpected storage failure.
    Repo(RepoError),
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationErrors> for ContactServiceError {
    fn from(value: ValidationErrors) -> Self {
        Self::Invalid(value)
    }
}

impl From<RepoError> for ContactServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Contact service facade over repository implementations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates raw input and stores it on success.
    ///
    /// # Errors
    /// - `Invalid` with every field violation when the gate rejects input.
    /// - `Repo` when the store fails unexpectedly.
    pub fn submit(
        &self,
        input: &ContactFormInput,
    ) -> Result<ContactSubmission, ContactServiceError> {
        let form = validate_contact_form(input).map_err(|errors| {
            debug!(
                "event=contact_submit module=service status=rejected error_count={}",
                errors.errors().len()
            );
            errors
        })?;

        // Store failures are reported once, by whoever maps the error.
        let submission = self.repo.create(form)?;

        info!(
            "event=contact_submit module=service status=ok id={} has_subject={}",
            submission.id,
            submission.subject.is_some()
        );
        Ok(submission)
    }

    /// Gets one submission by id; `Ok(None)` when it was never issued.
    pub fn get_submission(&self, id: SubmissionId) -> RepoResult<Option<ContactSubmission>> {
        self.repo.get_by_id(id)
    }

    /// Lists all submissions in ascending id order.
    pub fn list_submissions(&self) -> RepoResult<Vec<ContactSubmission>> {
        self.repo.list_all()
    }

    pub fn submission_count(&self) -> RepoResult<usize> {
        self.repo.len()
    }
}
