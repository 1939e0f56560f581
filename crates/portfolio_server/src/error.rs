//! HTTP error mapping.
//!
//! Every handler failure funnels through `ApiError`, whose `IntoResponse`
//! impl is the single place that picks status codes and user-facing text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{debug, error};
use portfolio_core::{ContactServiceError, ValidationErrors};
use serde::Serialize;
use thiserror::Error;

pub const INVALID_FORM_MESSAGE: &str = "Invalid form data";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const TOO_LARGE_MESSAGE: &str = "Request body too large";
pub const INTERNAL_MESSAGE: &str = "Failed to process your message. Please try again.";
pub const NOT_FOUND_MESSAGE: &str = "Not Found";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Form fields failed validation.
    #[error("{0}")]
    InvalidForm(ValidationErrors),
    /// Body could not be decoded into a form.
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("request body too large: {0}")]
    PayloadTooLarge(String),
    #[error("route not found")]
    NotFound,
    /// Anything unexpected; detail stays in server logs.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ContactServiceError> for ApiError {
    fn from(value: ContactServiceError) -> Self {
        match value {
            ContactServiceError::Invalid(errors) => Self::InvalidForm(errors),
            ContactServiceError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

impl ApiError {
    /// Maps a body extractor rejection, keeping its 413.
    pub fn rejected(status: StatusCode, detail: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(detail)
        } else {
            Self::MalformedBody(detail)
        }
    }
}

/// JSON body shared by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::InvalidForm(errors) => {
                debug!(
                    "event=api_error module=http status=rejected kind=invalid_form error_count={}",
                    errors.errors().len()
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        message: INVALID_FORM_MESSAGE,
                        errors: Some(errors),
                    },
                )
            }
            Self::MalformedBody(detail) => {
                debug!("event=api_error module=http status=rejected kind=malformed_body detail={detail}");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        message: INVALID_BODY_MESSAGE,
                        errors: None,
                    },
                )
            }
            Self::PayloadTooLarge(detail) => {
                debug!("event=api_error module=http status=rejected kind=payload_too_large detail={detail}");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    ErrorBody {
                        message: TOO_LARGE_MESSAGE,
                        errors: None,
                    },
                )
            }
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message: NOT_FOUND_MESSAGE,
                    errors: None,
                },
            ),
            Self::Internal(detail) => {
                error!("event=api_error module=http status=error kind=internal detail={detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: INTERNAL_MESSAGE,
                        errors: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
