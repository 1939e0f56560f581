//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define the submission store contract used by services.
//! - Keep storage details out of service/business orchestration.
//!
//! # Invariants
//! - Repositories only accept `ContactForm` values that passed the gate.
//! - Lookups of unknown ids return `Ok(None)`, never an error.

pub mod contact_repo;
