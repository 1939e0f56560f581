//! HTTP adapter for the portfolio site.
//!
//! # Responsibility
//! - Expose the contact flow as `POST /api/contact`.
//! - Serve the built static site when one is configured.
//! - Map core errors to stable JSON responses.
//!
//! # Invariants
//! - Every response body is JSON with a human-readable `message`, except
//!   static files.
//! - Handlers never panic on bad input; everything maps through `ApiError`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{load_config, ConfigError, ConfigOverrides, PortfolioConfig};
pub use error::{ApiError, ApiResult};
pub use server::{create_router, serve, ServerError};
pub use state::{AppState, SharedContactRepository};
