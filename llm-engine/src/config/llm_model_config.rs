use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// Contains both general and provider-specific parameters; extend as needed
/// to support new backends or features.
///
/// # Fields
///
/// - `provider`: Which backend to use (Ollama, OpenAI, scripted).
/// - `model`: The model identifier (e.g., `"qwen2.5-coder:7b"`, `"gpt-4o"`).
/// - `endpoint`: The inference base URL (local server or remote API).
/// - `api_key`: Optional API key for providers that require authentication.
/// - `max_tokens`: Maximum number of tokens to generate (if supported).
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff.
/// - `top_k`: Top-k sampling cutoff (Ollama only).
/// - `timeout_secs`: Optional request timeout in seconds.
#[derive(Debug, Clone)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// Inference endpoint (base URL).
    pub endpoint: String,

    /// Optional API key for authentication (e.g., OpenAI).
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Top-k sampling parameter.
    pub top_k: Option<u32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
