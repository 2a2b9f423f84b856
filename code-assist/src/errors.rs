//! Crate-wide error hierarchy for code-assist.
//!
//! Goals:
//! - Single root `Error` for all public pipeline operations.
//! - User-facing input errors (size/task/language) stay distinct from
//!   engine and rendering failures so callers can map them precisely.
//! - No dynamic dispatch, ergonomic `?` via `From` impls.

use thiserror::Error;

use llm_engine::LlmEngineError;

/// Convenient alias for crate-wide results.
pub type AssistResult<T> = Result<T, Error>;

/// Root error type for the code-assist crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Document exceeds the configured line limit. Raised before any cache
    /// or generation work.
    #[error("input too large: {lines} lines exceeds the limit of {max_lines}")]
    InputTooLarge {
        /// Line count of the submitted document.
        lines: usize,
        /// Configured limit.
        max_lines: usize,
    },

    /// Language tag outside the supported set (translate target, or the
    /// source language of any task).
    #[error("unsupported language: {tag}")]
    UnsupportedLanguage {
        /// The rejected tag as it arrived.
        tag: String,
    },

    /// Task value outside the known set.
    #[error("invalid task: {task}")]
    InvalidTask {
        /// The rejected task as it arrived.
        task: String,
    },

    /// Engine call failed or returned unusable output. The display stays
    /// generic; the cause is attached for logs.
    #[error("code generation failed")]
    Generation(#[from] LlmEngineError),

    /// Unexpected failure during diffing/highlighting.
    #[error("internal error: {0}")]
    Internal(String),
}
