//! HTTP layer for the code-assist backend.
//!
//! Thin axum surface over the pipeline crate:
//! - `POST /api/code`      — run a transformation task
//! - `GET  /api/languages` — supported language tags
//! - `GET  /health`        — engine reachability probe
//!
//! State is built once from environment variables and shared via
//! `Arc<AppState>`; pipeline errors map to JSON `{error, message}` bodies
//! with precise status codes in [`error_handler`].

use std::{env, sync::Arc};

pub mod core;
pub mod error_handler;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tracing::info;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::{
        code::code_route::transform_code, health_route::health, languages_route::list_languages,
    },
};

/// Default listen address when `API_ADDRESS` is unset.
const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";

/// Builds state from the environment and serves until ctrl-c.
pub async fn start() -> AppResult<()> {
    let state = Arc::new(AppState::from_env()?);
    let address = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_ADDRESS.into());

    let app = router(state);

    let listener = TcpListener::bind(&address).await.map_err(AppError::Bind)?;
    info!(%address, "api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// The application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/code", post(transform_code))
        .route("/api/languages", get(list_languages))
        .route("/health", get(health))
        .with_state(state)
}

/// Returns a future that resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");
}
