//! LLM backend selected by configuration

use crate::config::{LlmConfig, ProviderKind};
use async_trait::async_trait;
use parabox_domain::traits::LlmProvider;
use parabox_llm::{GeminiProvider, LlmError, OllamaProvider};
use std::time::Duration;

/// The configured LLM backend
pub enum Provider {
    /// Google Gemini
    Gemini(GeminiProvider),
    /// Local Ollama
    Ollama(OllamaProvider),
}

impl Provider {
    /// Build the backend named in `config`
    ///
    /// Fails when Gemini is selected and its API key variable is unset.
    pub fn from_config(config: &LlmConfig, timeout: Duration) -> Result<Self, LlmError> {
        match config.provider {
            ProviderKind::Gemini => Ok(Provider::Gemini(gemini(config, timeout)?)),
            ProviderKind::Ollama => {
                let endpoint = config
                    .endpoint
                    .as_deref()
                    .unwrap_or(parabox_llm::ollama::DEFAULT_ENDPOINT);
                Ok(Provider::Ollama(OllamaProvider::with_timeout(
                    endpoint,
                    &config.model,
                    timeout,
                )))
            }
        }
    }
}

/// Gemini client for `config`, whichever provider is selected
///
/// The API key is read from the variable named by `api_key_env`.
pub fn gemini(config: &LlmConfig, timeout: Duration) -> Result<GeminiProvider, LlmError> {
    let api_key = std::env::var(&config.api_key_env)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| LlmError::MissingApiKey(config.api_key_env.clone()))?;
    let endpoint = config
        .endpoint
        .as_deref()
        .unwrap_or(parabox_llm::gemini::DEFAULT_ENDPOINT);

    Ok(GeminiProvider::with_timeout(
        endpoint,
        &config.model,
        api_key,
        timeout,
    ))
}

#[async_trait]
impl LlmProvider for Provider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        match self {
            Provider::Gemini(p) => p.generate(prompt).await,
            Provider::Ollama(p) => p.generate(prompt).await,
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Provider::Gemini(p) => LlmProvider::model_name(p),
            Provider::Ollama(p) => LlmProvider::model_name(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_requires_key() {
        let config = LlmConfig {
            api_key_env: "PARABOX_TEST_NO_SUCH_KEY".to_string(),
            ..Default::default()
        };
        let result = Provider::from_config(&config, Duration::from_secs(5));
        assert!(matches!(result, Err(LlmError::MissingApiKey(_))));
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let config = LlmConfig {
            provider: ProviderKind::Ollama,
            model: "llama3".to_string(),
            ..Default::default()
        };
        let provider = Provider::from_config(&config, Duration::from_secs(5)).unwrap();
        assert_eq!(provider.model_name(), "llama3");
    }
}
