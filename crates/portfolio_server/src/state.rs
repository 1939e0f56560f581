//! Shared handler state.

use portfolio_core::{ContactRepository, ContactService, InMemoryContactRepository};
use std::sync::Arc;

/// Repository handle the HTTP layer works against.
pub type SharedContactRepository = Arc<dyn ContactRepository>;

/// Application state cloned into every handler.
///
/// The submission store is injected, so each test (or each process) owns an
/// isolated store instead of sharing a global one.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<ContactService<SharedContactRepository>>,
}

impl AppState {
    pub fn new(repo: SharedContactRepository) -> Self {
        Self {
            contacts: Arc::new(ContactService::new(repo)),
        }
    }

    /// State backed by a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryContactRepository::new()))
    }
}
