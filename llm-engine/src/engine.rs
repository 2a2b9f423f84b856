//! Engine selection and dispatch.
//!
//! [`GenerationEngine`] is a thin enum over the concrete provider services.
//! Call sites use plain `async fn` dispatch; the variant is chosen once at
//! startup from `LLM_PROVIDER` and injected into the pipeline.

use tracing::info;

use crate::{
    config::{
        default_config::config_from_env, llm_model_config::LlmModelConfig,
        llm_provider::LlmProvider,
    },
    error_handler::Result,
    services::{
        ollama_service::OllamaService, open_ai_service::OpenAiService,
        scripted_service::ScriptedService,
    },
};

/// Generation backend injected into the pipeline at construction time.
#[derive(Debug)]
pub enum GenerationEngine {
    /// Local Ollama runtime.
    Ollama(OllamaService),
    /// OpenAI-compatible chat API.
    OpenAi(OpenAiService),
    /// Canned replies for tests and offline runs.
    Scripted(ScriptedService),
}

impl GenerationEngine {
    /// Builds the engine selected by `LLM_PROVIDER` (default: Ollama).
    ///
    /// # Errors
    /// Propagates config parsing and service construction errors.
    pub fn from_env() -> Result<Self> {
        let cfg = config_from_env()?;
        Self::from_config(cfg)
    }

    /// Builds the engine for an explicit config.
    ///
    /// # Errors
    /// Propagates service constructor validation errors.
    pub fn from_config(cfg: LlmModelConfig) -> Result<Self> {
        let engine = match cfg.provider {
            LlmProvider::Ollama => Self::Ollama(OllamaService::new(cfg)?),
            LlmProvider::OpenAi => Self::OpenAi(OpenAiService::new(cfg)?),
            LlmProvider::Scripted => Self::Scripted(ScriptedService::new()),
        };

        info!(provider = engine.provider_name(), "generation engine ready");
        Ok(engine)
    }

    /// Stable provider name for logs and the health endpoint body.
    pub fn provider_name(&self) -> &'static str {
        match self {
            Self::Ollama(_) => LlmProvider::Ollama.as_str(),
            Self::OpenAi(_) => LlmProvider::OpenAi.as_str(),
            Self::Scripted(_) => LlmProvider::Scripted.as_str(),
        }
    }

    /// Produces a completion for `prompt` on the selected backend.
    ///
    /// # Errors
    /// Propagates the backend's provider/transport errors.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        match self {
            Self::Ollama(svc) => svc.generate(prompt).await,
            Self::OpenAi(svc) => svc.generate(prompt).await,
            Self::Scripted(svc) => svc.generate(prompt).await,
        }
    }

    /// Probes backend reachability. The scripted backend is always healthy.
    ///
    /// # Errors
    /// Propagates the backend's probe errors.
    pub async fn health_check(&self) -> Result<()> {
        match self {
            Self::Ollama(svc) => svc.health().await,
            Self::OpenAi(svc) => svc.health().await,
            Self::Scripted(_) => Ok(()),
        }
    }
}

impl From<ScriptedService> for GenerationEngine {
    fn from(svc: ScriptedService) -> Self {
        Self::Scripted(svc)
    }
}
