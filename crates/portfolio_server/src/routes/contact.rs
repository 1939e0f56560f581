//! `POST /api/contact`.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{FromRequest, Request, State};
use axum::http::{header, StatusCode};
use axum::{Form, Json};
use portfolio_core::{ContactFormInput, SubmissionId};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const ACCEPTED_MESSAGE: &str = "Message received successfully";

/// Success body for an accepted submission.
#[derive(Debug, Serialize)]
pub struct ContactAccepted {
    pub message: &'static str,
    pub id: SubmissionId,
}

/// How the request body is decoded, picked from `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    UrlEncoded,
    /// Missing or unsupported type; the body is ignored.
    Unparsed,
}

fn body_kind(request: &Request) -> BodyKind {
    let Some(value) = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return BodyKind::Unparsed;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json")) {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::UrlEncoded
    } else {
        BodyKind::Unparsed
    }
}

/// Validates and stores one contact submission.
///
/// JSON and urlencoded bodies are both accepted. Any other body is treated
/// as an empty form, so the caller gets per-field `required` errors.
///
/// - 201 with the new id on success.
/// - 400 with field errors when validation fails.
/// - 400 without field errors when a JSON body is unparsable or not an object.
/// - 413 when the body exceeds the extractor limit.
/// - 500 with a generic message on storage failure.
pub async fn submit_contact(
    State(state): State<AppState>,
    request: Request,
) -> ApiResult<(StatusCode, Json<ContactAccepted>)> {
    let input = match body_kind(&request) {
        BodyKind::Json => {
            let Json(body) = Json::<Value>::from_request(request, &state)
                .await
                .map_err(|rejection| ApiError::rejected(rejection.status(), rejection.body_text()))?;
            ContactFormInput::from_json(&body)
                .ok_or_else(|| ApiError::MalformedBody("expected a JSON object".to_string()))?
        }
        BodyKind::UrlEncoded => {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(request, &state)
                .await
                .map_err(|rejection| ApiError::rejected(rejection.status(), rejection.body_text()))?;
            let object: Map<String, Value> = fields
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect();
            ContactFormInput::from_json(&Value::Object(object)).unwrap_or_default()
        }
        BodyKind::Unparsed => ContactFormInput::default(),
    };

    let submission = state.contacts.submit(&input)?;

    Ok((
        StatusCode::CREATED,
        Json(ContactAccepted {
            message: ACCEPTED_MESSAGE,
            id: submission.id,
        }),
    ))
}
