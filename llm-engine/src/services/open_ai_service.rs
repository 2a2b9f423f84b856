//! OpenAI-compatible service for code generation.
//!
//! Minimal, non-streaming client around the chat completions REST API.
//! Endpoints are derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/v1/chat/completions — chat completion (non-streaming)
//! - GET  {endpoint}/v1/models           — reachability probe
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::OpenAi`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized via unified error types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{ProviderError, Result, make_snippet},
};

/// Thin client for an OpenAI-compatible API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (with timeout and default headers).
///
/// High-level operations:
/// - [`OpenAiService::generate`] — single, non-streaming chat completion
/// - [`OpenAiService::health`]   — model listing reachability probe
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
    url_models: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// Validates the provider, API key, and endpoint scheme. Builds an HTTP
    /// client with default headers and a configurable timeout.
    ///
    /// # Errors
    /// - [`ProviderError::InvalidProvider`] if `cfg.provider` is not OpenAI
    /// - [`ProviderError::MissingApiKey`] if `cfg.api_key` is `None`
    /// - [`ProviderError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`LlmEngineError::HttpTransport`] if the HTTP client cannot be built
    ///
    /// [`LlmEngineError::HttpTransport`]: crate::error_handler::LlmEngineError::HttpTransport
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        // 1) Provider must be OpenAI.
        if cfg.provider != LlmProvider::OpenAi {
            return Err(ProviderError::InvalidProvider.into());
        }

        // 2) API key must be present.
        let api_key = cfg
            .api_key
            .clone()
            .ok_or(ProviderError::MissingApiKey)?;

        // 3) Endpoint must use http/https.
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::InvalidEndpoint(cfg.endpoint.clone()).into());
        }

        // 4) HTTP client: timeout + default headers.
        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(120));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
                ProviderError::Decode(format!("invalid API key header: {e}"))
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{}/v1/chat/completions", base);
        let url_models = format!("{}/v1/models", base);

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(120),
            "OpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
            url_models,
        })
    }

    /// Performs a **non-streaming** chat completion request
    /// (`/v1/chat/completions`) with a single user message.
    ///
    /// Mapped options from config: `model`, `temperature`, `top_p`,
    /// `max_tokens`.
    ///
    /// # Errors
    /// - [`ProviderError::HttpStatus`] for non-2xx responses
    /// - [`LlmEngineError::HttpTransport`] for client/network failures
    /// - [`ProviderError::Decode`] if the JSON cannot be parsed
    /// - [`ProviderError::EmptyCompletion`] if no choices are returned
    ///
    /// [`LlmEngineError::HttpTransport`]: crate::error_handler::LlmEngineError::HttpTransport
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt);

        debug!(
            model = %self.cfg.model,
            endpoint = %self.cfg.endpoint,
            prompt_len = prompt.len(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "OpenAI /v1/chat/completions returned non-success status"
            );

            return Err(ProviderError::HttpStatus {
                status,
                url,
                snippet,
            }
            .into());
        }

        let out: ChatCompletionResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode /v1/chat/completions response"
                );
                return Err(ProviderError::Decode(format!(
                    "serde error: {e}; expected `choices[0].message.content`"
                ))
                .into());
            }
        };

        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or(ProviderError::EmptyCompletion)?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            response_len = content.len(),
            "chat completion completed"
        );

        Ok(content)
    }

    /// Probes `/v1/models` to confirm the API is reachable and the key is
    /// accepted.
    ///
    /// # Errors
    /// - [`ProviderError::HttpStatus`] for non-2xx responses
    /// - [`LlmEngineError::HttpTransport`] for client/network failures
    ///
    /// [`LlmEngineError::HttpTransport`]: crate::error_handler::LlmEngineError::HttpTransport
    pub async fn health(&self) -> Result<()> {
        let resp = self.client.get(&self.url_models).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_models.clone();
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

/* ===========================================================================
HTTP payloads & options
======================================================================== */

/// Minimal request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    /// Builds a minimal single-user-message chat request from config.
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str) -> Self {
        let messages = vec![ChatMessage {
            role: "user",
            content: prompt,
        }];

        Self {
            model: &cfg.model,
            messages,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_tokens: cfg.max_tokens,
        }
    }
}

/// Chat message for the OpenAI API.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    /// One of: "system" | "user" | "assistant".
    role: &'a str,
    content: &'a str,
}

/// Minimal response for `/v1/chat/completions`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::LlmEngineError;

    fn cfg(api_key: Option<&str>) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::OpenAi,
            model: "gpt-4o-mini".into(),
            endpoint: "https://api.openai.com".into(),
            api_key: api_key.map(str::to_string),
            max_tokens: Some(1200),
            temperature: Some(0.2),
            top_p: Some(0.9),
            top_k: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn new_requires_api_key() {
        let err = OpenAiService::new(cfg(None)).unwrap_err();
        assert!(matches!(
            err,
            LlmEngineError::Provider(ProviderError::MissingApiKey)
        ));
    }

    #[test]
    fn chat_request_carries_single_user_message() {
        let c = cfg(Some("sk-test"));
        let body = ChatCompletionRequest::from_cfg(&c, "ciao");
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "ciao");
        assert_eq!(value["max_tokens"], 1200);
        assert!(value.get("top_k").is_none());
    }

    #[test]
    fn urls_derive_from_endpoint() {
        let svc = OpenAiService::new(cfg(Some("sk-test"))).unwrap();
        assert_eq!(svc.url_chat, "https://api.openai.com/v1/chat/completions");
        assert_eq!(svc.url_models, "https://api.openai.com/v1/models");
    }
}
