//! Route handlers grouped by resource.

pub mod contact;

use crate::error::ApiError;

/// Fallback for unmatched routes when no static site is served.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
