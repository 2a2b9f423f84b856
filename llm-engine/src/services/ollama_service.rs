//! Lightweight Ollama service for code generation.
//!
//! This module implements a thin client for the local Ollama API:
//! - `POST {endpoint}/api/generate` — synchronous text generation (`stream=false`)
//! - `GET  {endpoint}/api/tags`     — reachability probe for health checks
//!
//! It uses the universal configuration [`LlmModelConfig`] and ensures
//! that the selected provider is [`LlmProvider::Ollama`].
//!
//! # Examples
//!
//! ```no_run
//! use llm_engine::config::llm_model_config::LlmModelConfig;
//! use llm_engine::config::llm_provider::LlmProvider;
//! use llm_engine::services::ollama_service::OllamaService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = LlmModelConfig {
//!     provider: LlmProvider::Ollama,
//!     model: "qwen2.5-coder:7b".into(),
//!     endpoint: "http://localhost:11434".into(),
//!     api_key: None,
//!     max_tokens: Some(1200),
//!     temperature: Some(0.2),
//!     top_p: Some(0.9),
//!     top_k: Some(50),
//!     timeout_secs: Some(120),
//! };
//!
//! let svc = OllamaService::new(cfg)?;
//! let text = svc.generate("# Spiega il seguente codice\nprint(1)").await?;
//! println!("Generated:\n{}", text);
//! # Ok(()) }
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::config::llm_provider::LlmProvider;
use crate::config::llm_model_config::LlmModelConfig;
use crate::error_handler::{ProviderError, Result, make_snippet};

/// Thin client for Ollama.
///
/// Initialized with a full [`LlmModelConfig`]. Reuses an HTTP client with
/// a configurable timeout. Provides high-level calls:
/// - [`OllamaService::generate`] — synchronous text generation
/// - [`OllamaService::health`]   — runtime reachability probe
#[derive(Debug)]
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    url_tags: String,
}

impl OllamaService {
    /// Creates a new [`OllamaService`] from the given config.
    ///
    /// # Errors
    /// - [`ProviderError::InvalidProvider`] if `cfg.provider` is not `Ollama`
    /// - [`ProviderError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`LlmEngineError::HttpTransport`] if the HTTP client cannot be built
    ///
    /// [`LlmEngineError::HttpTransport`]: crate::error_handler::LlmEngineError::HttpTransport
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        if cfg.provider != LlmProvider::Ollama {
            return Err(ProviderError::InvalidProvider.into());
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::InvalidEndpoint(cfg.endpoint).into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(120));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .brotli(true)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{}/api/generate", base);
        let url_tags = format!("{}/api/tags", base);

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(120),
            "OllamaService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
            url_tags,
        })
    }

    /// Performs a **non-streaming** generation request via `/api/generate`.
    ///
    /// Mapped options:
    /// - `model`        ← `self.cfg.model`
    /// - `prompt`       ← argument
    /// - `num_predict`  ← `self.cfg.max_tokens`
    /// - `temperature`  ← `self.cfg.temperature`
    /// - `top_p`        ← `self.cfg.top_p`
    /// - `top_k`        ← `self.cfg.top_k`
    ///
    /// # Errors
    /// - [`ProviderError::HttpStatus`] for non-2xx responses
    /// - [`LlmEngineError::HttpTransport`] for client errors
    /// - [`ProviderError::Decode`] if the response cannot be parsed
    ///
    /// [`LlmEngineError::HttpTransport`]: crate::error_handler::LlmEngineError::HttpTransport
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let started = Instant::now();
        let body = GenerateRequest::from_cfg(&self.cfg, prompt);

        debug!(prompt_len = prompt.len(), "POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "Ollama /api/generate returned non-success status"
            );

            return Err(ProviderError::HttpStatus {
                status,
                url,
                snippet,
            }
            .into());
        }

        let out: GenerateResponse = resp.json().await.map_err(|e| {
            ProviderError::Decode(format!("serde error: {e}; ensure `stream=false` is used"))
        })?;

        info!(
            latency_ms = started.elapsed().as_millis(),
            response_len = out.response.len(),
            "generation completed"
        );

        Ok(out.response)
    }

    /// Probes `/api/tags` to confirm the runtime is reachable.
    ///
    /// # Errors
    /// - [`ProviderError::HttpStatus`] for non-2xx responses
    /// - [`LlmEngineError::HttpTransport`] for client errors
    ///
    /// [`LlmEngineError::HttpTransport`]: crate::error_handler::LlmEngineError::HttpTransport
    pub async fn health(&self) -> Result<()> {
        let resp = self.client.get(&self.url_tags).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_tags.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::HttpStatus {
                status,
                url,
                snippet: make_snippet(&text),
            }
            .into());
        }

        Ok(())
    }
}

/* ==========================
HTTP payloads & options
========================== */

/// Request body for `/api/generate` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

impl<'a> GenerateRequest<'a> {
    /// Builds a request from config and prompt.
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str) -> Self {
        let options = GenerateOptions {
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            top_k: cfg.top_k,
            num_predict: cfg.max_tokens,
        };

        Self {
            model: &cfg.model,
            prompt,
            stream: false,
            options: Some(options),
        }
    }
}

/// Subset of Ollama `options`.
///
/// Extend this struct as needed (stop sequences, penalties, etc.).
#[derive(Debug, Default, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Response body for `/api/generate`.
///
/// Minimal shape: the generated text is in `response`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::LlmEngineError;

    fn cfg(endpoint: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "qwen2.5-coder:7b".into(),
            endpoint: endpoint.into(),
            api_key: None,
            max_tokens: Some(1200),
            temperature: Some(0.2),
            top_p: Some(0.9),
            top_k: Some(50),
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn new_rejects_non_http_endpoint() {
        let err = OllamaService::new(cfg("localhost:11434")).unwrap_err();
        assert!(matches!(
            err,
            LlmEngineError::Provider(ProviderError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn new_rejects_foreign_provider() {
        let mut c = cfg("http://localhost:11434");
        c.provider = LlmProvider::Scripted;
        let err = OllamaService::new(c).unwrap_err();
        assert!(matches!(
            err,
            LlmEngineError::Provider(ProviderError::InvalidProvider)
        ));
    }

    #[test]
    fn generate_request_serializes_expected_shape() {
        let c = cfg("http://localhost:11434");
        let body = GenerateRequest::from_cfg(&c, "hello");
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["model"], "qwen2.5-coder:7b");
        assert_eq!(value["prompt"], "hello");
        assert_eq!(value["stream"], false);
        assert_eq!(value["options"]["num_predict"], 1200);
        assert_eq!(value["options"]["top_k"], 50);
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let svc = OllamaService::new(cfg("http://localhost:11434/")).unwrap();
        assert_eq!(svc.url_generate, "http://localhost:11434/api/generate");
        assert_eq!(svc.url_tags, "http://localhost:11434/api/tags");
    }
}
