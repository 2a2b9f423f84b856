//! Code-generation engine with pluggable provider backends.
//!
//! The crate exposes:
//! - [`GenerationEngine`] — enum dispatch over the provider services, chosen
//!   once at startup and injected into callers;
//! - provider clients: [`OllamaService`], [`OpenAiService`], and the
//!   in-process [`ScriptedService`] used by tests and offline runs;
//! - env-driven configuration ([`LlmModelConfig`], [`LlmProvider`]);
//! - unified error types in [`error_handler`].
//!
//! Dispatch relies on plain `async fn` and enum matching over thin provider
//! clients; there are no trait objects in the call path.

pub mod config;
pub mod engine;
pub mod error_handler;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use engine::GenerationEngine;
pub use error_handler::LlmEngineError;
pub use services::ollama_service::OllamaService;
pub use services::open_ai_service::OpenAiService;
pub use services::scripted_service::ScriptedService;
