use code_assist::{AssistOptions, AssistPipeline};
use llm_engine::GenerationEngine;

use crate::error_handler::{AppError, AppResult};

/// Shared state for all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    /// The assembled transformation pipeline (engine + cache + limits).
    pub pipeline: AssistPipeline,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// The engine comes from the `LLM_*` variables; `ASSIST_MAX_LINES` and
    /// `ASSIST_CACHE_CAPACITY` override the pipeline defaults. Invalid
    /// numbers are startup errors, never silently defaulted.
    pub fn from_env() -> AppResult<Self> {
        let engine = GenerationEngine::from_env()?;

        let defaults = AssistOptions::default();
        let options = AssistOptions {
            max_lines: env_usize("ASSIST_MAX_LINES", defaults.max_lines)?,
            cache_capacity: env_usize("ASSIST_CACHE_CAPACITY", defaults.cache_capacity)?,
        };

        Ok(Self {
            pipeline: AssistPipeline::new(engine, options),
        })
    }
}

fn env_usize(var: &'static str, default: usize) -> AppResult<usize> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().parse::<usize>().map_err(|_| AppError::Config {
            var,
            reason: "expected a non-negative integer",
        }),
        _ => Ok(default),
    }
}
