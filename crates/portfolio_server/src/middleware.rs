//! Request logging for API routes.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use log::info;
use std::time::Instant;

/// Logs method, path, status and latency for every `/api` request.
///
/// Static asset requests pass through unlogged.
pub async fn log_api_requests(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !path.starts_with("/api") {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let started = Instant::now();
    let response = next.run(request).await;

    info!(
        "event=api_request module=http method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}
