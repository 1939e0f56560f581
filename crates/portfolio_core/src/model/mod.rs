//! Domain model for contact-form submissions.
//!
//! # Responsibility
//! - Define the raw, validated and stored shapes of a contact message.
//!
//! # Invariants
//! - A `ContactSubmission` is immutable once stored.
//! - `subject` is always present in the stored shape (`null` when absent).

pub mod contact;
