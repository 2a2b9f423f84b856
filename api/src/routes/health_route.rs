//! GET /health — generation engine reachability probe.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::error;

use crate::{core::app_state::AppState, error_handler::AppError};

/// Response payload for /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Configured engine backend (`ollama`, `openai`, `scripted`).
    pub provider: &'static str,
}

/// Handler: GET /health
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, AppError> {
    state.pipeline.engine().health_check().await.map_err(|err| {
        error!(error = %err, "engine health probe failed");
        AppError::Http {
            status: StatusCode::BAD_GATEWAY,
            code: "ENGINE_UNREACHABLE",
            message: "generation engine is not reachable".into(),
        }
    })?;

    Ok(Json(HealthResponse {
        status: "ok",
        provider: state.pipeline.engine().provider_name(),
    }))
}
