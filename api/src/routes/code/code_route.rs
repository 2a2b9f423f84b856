//! POST /api/code — transforms code per task and returns highlighted markup.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use code_assist::AssistRequest;

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    routes::code::code_request::{CodeRequest, CodeResponse},
};

/// Handler: POST /api/code
///
/// The payload extractor result is taken explicitly so malformed JSON maps
/// through [`AppError`] into the usual `{error, message}` body instead of
/// axum's plain-text default.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/api/code \
///   -H 'content-type: application/json' \
///   -d '{"code":"print(1)\nprint(2)","task":"fix"}'
/// ```
pub async fn transform_code(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CodeRequest>, JsonRejection>,
) -> Result<Json<CodeResponse>, AppError> {
    let Json(body) = payload?;

    let output = state
        .pipeline
        .process(AssistRequest {
            task: &body.task,
            code: &body.code,
            source_lang: body.source_lang.as_deref(),
            target_lang: body.target_lang.as_deref(),
        })
        .await?;

    Ok(Json(CodeResponse {
        result: output.markup,
    }))
}
