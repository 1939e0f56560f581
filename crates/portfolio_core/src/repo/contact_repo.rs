//! Submission store contract and in-memory implementation.
//!
//! # Responsibility
//! - Assign sequential ids and acceptance timestamps to validated forms.
//! - Provide read-back by id and full listing in insertion order.
//!
//! # Invariants
//! - Ids start at 1, are strictly increasing and never reused.
//! - "Read counter, increment, insert" happens under one lock acquisition.
//! - Stored records are never mutated or removed.
//! - Contents live only as long as the process; nothing is persisted.

use crate::model::contact::{ContactForm, ContactSubmission, SubmissionId};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};

pub type RepoResult<T> = Result<T, RepoError>;

/// Clock used to stamp `created_at`.
pub type Clock = fn() -> DateTime<Utc>;

/// Unexpected storage failure.
#[derive(Debug)]
pub enum RepoError {
    /// A writer panicked while holding the store lock.
    Poisoned,
    /// The id counter cannot advance any further.
    IdsExhausted,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Poisoned => write!(f, "submission store lock poisoned"),
            Self::IdsExhausted => write!(f, "submission id space exhausted"),
        }
    }
}

impl Error for RepoError {}

/// Repository interface for contact submissions.
pub trait ContactRepository: Send + Sync {
    /// Stores a validated form and returns the full stored record.
    fn create(&self, form: ContactForm) -> RepoResult<ContactSubmission>;
    fn get_by_id(&self, id: SubmissionId) -> RepoResult<Option<ContactSubmission>>;
    /// Returns all records in ascending id order.
    fn list_all(&self) -> RepoResult<Vec<ContactSubmission>>;
    fn len(&self) -> RepoResult<usize>;

    fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<R: ContactRepository + ?Sized> ContactRepository for Arc<R> {
    fn create(&self, form: ContactForm) -> RepoResult<ContactSubmission> {
        (**self).create(form)
    }

    fn get_by_id(&self, id: SubmissionId) -> RepoResult<Option<ContactSubmission>> {
        (**self).get_by_id(id)
    }

    fn list_all(&self) -> RepoResult<Vec<ContactSubmission>> {
        (**self).list_all()
    }

    fn len(&self) -> RepoResult<usize> {
        (**self).len()
    }
}

struct StoreState {
    next_id: SubmissionId,
    submissions: BTreeMap<SubmissionId, ContactSubmission>,
}

/// Process-local submission store.
pub struct InMemoryContactRepository {
    state: Mutex<StoreState>,
    clock: Clock,
}

impl InMemoryContactRepository {
    /// Creates an empty store stamping records with the system clock.
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Creates an empty store with a caller-provided clock.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            state: Mutex::new(StoreState {
                next_id: 1,
                submissions: BTreeMap::new(),
            }),
            clock,
        }
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, StoreState>> {
        self.state.lock().map_err(|_| RepoError::Poisoned)
    }
}

impl Default for InMemoryContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactRepository for InMemoryContactRepository {
    fn create(&self, form: ContactForm) -> RepoResult<ContactSubmission> {
        let mut state = self.lock()?;
        let id = state.next_id;
        state.next_id = id.checked_add(1).ok_or(RepoError::IdsExhausted)?;

        let submission = ContactSubmission::from_form(id, form, (self.clock)());
        state.submissions.insert(id, submission.clone());
        Ok(submission)
    }

    fn get_by_id(&self, id: SubmissionId) -> RepoResult<Option<ContactSubmission>> {
        Ok(self.lock()?.submissions.get(&id).cloned())
    }

    fn list_all(&self) -> RepoResult<Vec<ContactSubmission>> {
        Ok(self.lock()?.submissions.values().cloned().collect())
    }

    fn len(&self) -> RepoResult<usize> {
        Ok(self.lock()?.submissions.len())
    }
}
