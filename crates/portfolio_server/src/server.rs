//! Router assembly and the listen loop.

use crate::config::ServerSection;
use crate::middleware::log_api_requests;
use crate::routes::{self, contact};
use crate::state::AppState;
use axum::routing::post;
use axum::{middleware, Router};
use log::{info, warn};
use std::path::Path;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server terminated: {0}")]
    Serve(#[source] std::io::Error),
}

/// Builds the application router.
///
/// When `static_dir` is given and exists, unmatched requests are served
/// from it and unknown paths fall back to `index.html` for client-side
/// routing. Otherwise unmatched requests get a JSON 404.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/api/contact", post(contact::submit_contact))
        .with_state(state);

    let router = match static_dir.filter(|dir| dir.is_dir()) {
        Some(dir) => {
            info!(
                "event=static_site module=http status=enabled dir={}",
                dir.display()
            );
            let index = dir.join("index.html");
            router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        }
        None => {
            if let Some(dir) = static_dir {
                warn!(
                    "event=static_site module=http status=disabled reason=missing_dir dir={}",
                    dir.display()
                );
            }
            router.fallback(routes::not_found)
        }
    };

    router.layer(middleware::from_fn(log_api_requests))
}

/// Binds `config.host:config.port` and serves until Ctrl-C.
pub async fn serve(config: &ServerSection, state: AppState) -> Result<(), ServerError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    let router = create_router(state, config.static_dir.as_deref());
    info!("event=server_start module=http status=ok addr={addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("event=server_stop module=http status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=shutdown_signal module=http status=error error={err}");
        std::future::pending::<()>().await;
    }
}
