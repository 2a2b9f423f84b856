use crate::error_handler::ConfigError;

/// Represents the provider (backend) used for code generation.
///
/// This enum distinguishes between the local Ollama runtime, an
/// OpenAI-compatible chat API, and the in-process scripted backend used by
/// tests and offline runs.
///
/// Adding more providers in the future (e.g., Anthropic Claude, Mistral API)
/// can be done by extending this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
    /// OpenAI-compatible chat completions API.
    OpenAi,
    /// In-process scripted backend (canned replies).
    Scripted,
}

impl LlmProvider {
    /// Stable lowercase name used in env config, logs, and the health body.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAi => "openai",
            Self::Scripted => "scripted",
        }
    }

    /// Parses an `LLM_PROVIDER` value (case-insensitive).
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedProvider`] for anything outside the
    /// known set. `chatgpt` is accepted as an alias for `openai`.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" | "chatgpt" => Ok(Self::OpenAi),
            "scripted" => Ok(Self::Scripted),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_providers_case_insensitively() {
        assert_eq!(LlmProvider::parse("Ollama").unwrap(), LlmProvider::Ollama);
        assert_eq!(LlmProvider::parse("OPENAI").unwrap(), LlmProvider::OpenAi);
        assert_eq!(LlmProvider::parse("chatgpt").unwrap(), LlmProvider::OpenAi);
        assert_eq!(
            LlmProvider::parse(" scripted ").unwrap(),
            LlmProvider::Scripted
        );
    }

    #[test]
    fn parse_rejects_unknown_provider() {
        assert!(matches!(
            LlmProvider::parse("bedrock"),
            Err(ConfigError::UnsupportedProvider(_))
        ));
    }
}
