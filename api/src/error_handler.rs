use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use llm_engine::LlmEngineError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("engine setup failed")]
    Engine(#[from] LlmEngineError),

    #[error("invalid value in {var}: {reason}")]
    Config {
        var: &'static str,
        reason: &'static str,
    },

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Rich HTTP error mapped from the pipeline with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // startup-only
            AppError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,

            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // 5xx
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Engine(_) => "ENGINE_ERROR",
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert common Axum rejections to `AppError`.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Convert pipeline errors to `AppError::Http` with precise status & code.
/// Generation/internal details go to the log; the response body stays generic.
impl From<code_assist::Error> for AppError {
    fn from(err: code_assist::Error) -> Self {
        use code_assist::Error as E;
        match err {
            E::InputTooLarge { .. } => AppError::Http {
                status: StatusCode::PAYLOAD_TOO_LARGE,
                code: "INPUT_TOO_LARGE",
                message: err.to_string(),
            },
            E::UnsupportedLanguage { .. } => AppError::Http {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                code: "UNSUPPORTED_LANGUAGE",
                message: err.to_string(),
            },
            E::InvalidTask { .. } => AppError::Http {
                status: StatusCode::BAD_REQUEST,
                code: "INVALID_TASK",
                message: err.to_string(),
            },
            E::Generation(ref source) => {
                error!(error = %source, "code generation failed");
                AppError::Http {
                    status: StatusCode::BAD_GATEWAY,
                    code: "GENERATION_FAILED",
                    message: "code generation failed".into(),
                }
            }
            E::Internal(ref detail) => {
                error!(detail, "pipeline internal error");
                AppError::Http {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "INTERNAL_ERROR",
                    message: "internal error".into(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_engine::error_handler::ProviderError;

    fn mapped(err: code_assist::Error) -> (StatusCode, &'static str) {
        let app: AppError = err.into();
        (app.status_code(), app.error_code())
    }

    #[test]
    fn input_errors_keep_their_detail() {
        let (status, code) = mapped(code_assist::Error::InputTooLarge {
            lines: 10_001,
            max_lines: 10_000,
        });
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(code, "INPUT_TOO_LARGE");

        let (status, code) = mapped(code_assist::Error::UnsupportedLanguage {
            tag: "klingon".into(),
        });
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "UNSUPPORTED_LANGUAGE");

        let (status, code) = mapped(code_assist::Error::InvalidTask {
            task: "refactor".into(),
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "INVALID_TASK");
    }

    #[test]
    fn generation_failures_map_to_a_generic_bad_gateway() {
        let err = code_assist::Error::Generation(ProviderError::EmptyCompletion.into());
        let app: AppError = err.into();
        assert_eq!(app.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(app.error_code(), "GENERATION_FAILED");
        // The upstream detail must not leak into the user-facing message.
        assert_eq!(app.to_string(), "code generation failed");
    }

    #[test]
    fn internal_errors_map_to_a_generic_500() {
        let app: AppError = code_assist::Error::Internal("table index out of sync".into()).into();
        assert_eq!(app.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app.error_code(), "INTERNAL_ERROR");
        assert_eq!(app.to_string(), "internal error");
    }
}
