//! Default engine config loaded strictly from environment variables.
//!
//! Single-config variant of per-role profiles: the assist pipeline drives one
//! model, so one set of `LLM_*` variables covers it. Every variable is
//! optional; unset values fall back to a local Ollama runtime with sampling
//! parameters tuned for faithful code transforms.
//!
//! # Environment variables
//!
//! - `LLM_PROVIDER`     = provider kind (`ollama`, `openai`, `scripted`)
//! - `LLM_MODEL`        = model identifier
//! - `LLM_ENDPOINT`     = base URL for the provider API
//! - `LLM_API_KEY`      = API key (required by the OpenAI service)
//! - `LLM_MAX_TOKENS`   = completion budget (u32)
//! - `LLM_TEMPERATURE`  = sampling temperature (f32)
//! - `LLM_TOP_P`        = nucleus sampling cutoff (f32)
//! - `LLM_TOP_K`        = top-k sampling cutoff (u32)
//! - `LLM_TIMEOUT_SECS` = request timeout in seconds (u64)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        Result, env_opt_f32, env_opt_u32, env_opt_u64, validate_http_endpoint, validate_range_f32,
    },
};

/// Fallback model when `LLM_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "qwen2.5-coder:7b";

/// Fallback endpoint when `LLM_ENDPOINT` is unset (local Ollama).
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

const DEFAULT_MAX_TOKENS: u32 = 1200;
const DEFAULT_TEMPERATURE: f32 = 0.2;
const DEFAULT_TOP_P: f32 = 0.9;
const DEFAULT_TOP_K: u32 = 50;
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Builds the engine config from environment.
///
/// Invalid numeric values are reported as config errors instead of being
/// silently defaulted; absent values take the documented defaults.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_PROVIDER`
/// - [`ConfigError::InvalidFormat`] for a non-HTTP `LLM_ENDPOINT`
/// - [`ConfigError::InvalidNumber`]/[`ConfigError::OutOfRange`] for bad
///   sampling parameters
///
/// [`ConfigError::UnsupportedProvider`]: crate::error_handler::ConfigError::UnsupportedProvider
/// [`ConfigError::InvalidFormat`]: crate::error_handler::ConfigError::InvalidFormat
/// [`ConfigError::InvalidNumber`]: crate::error_handler::ConfigError::InvalidNumber
/// [`ConfigError::OutOfRange`]: crate::error_handler::ConfigError::OutOfRange
pub fn config_from_env() -> Result<LlmModelConfig> {
    let provider = match std::env::var("LLM_PROVIDER") {
        Ok(v) if !v.trim().is_empty() => LlmProvider::parse(&v)?,
        _ => LlmProvider::Ollama,
    };

    let model = env_or("LLM_MODEL", DEFAULT_MODEL);
    let endpoint = env_or("LLM_ENDPOINT", DEFAULT_ENDPOINT);
    validate_http_endpoint("LLM_ENDPOINT", &endpoint)?;

    let api_key = std::env::var("LLM_API_KEY")
        .ok()
        .filter(|s| !s.trim().is_empty());

    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?.or(Some(DEFAULT_MAX_TOKENS));
    let temperature = env_opt_f32("LLM_TEMPERATURE")?.or(Some(DEFAULT_TEMPERATURE));
    let top_p = env_opt_f32("LLM_TOP_P")?.or(Some(DEFAULT_TOP_P));
    let top_k = env_opt_u32("LLM_TOP_K")?.or(Some(DEFAULT_TOP_K));
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(DEFAULT_TIMEOUT_SECS));

    if let Some(t) = temperature {
        validate_range_f32("temperature", t, 0.0, 2.0)?;
    }
    if let Some(p) = top_p {
        validate_range_f32("top_p", p, 0.0, 1.0)?;
    }

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens,
        temperature,
        top_p,
        top_k,
        timeout_secs,
    })
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
