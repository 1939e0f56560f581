//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate gate and repository calls into use-case level APIs.
//! - Keep HTTP/CLI layers decoupled from storage details.

pub mod contact_service;
