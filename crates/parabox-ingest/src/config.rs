//! Pipeline configuration
//!
//! Loaded from TOML. Every key is optional:
//!
//! ```toml
//! vault_root = "/Users/me/SecondBrain"
//! inbox = "Inbox/notes"
//! max_concurrent = 4
//! debounce_ms = 500
//!
//! [classifier]
//! max_input_chars = 10000
//! fallback_summary_chars = 300
//! request_timeout_secs = 120
//!
//! [llm]
//! provider = "gemini"
//! model = "gemini-2.5-pro"
//! api_key_env = "GEMINI_API_KEY"
//! ```

use parabox_classifier::ClassifierConfig;
use parabox_vault::{VaultLayout, DEFAULT_INBOX};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default vault location, under the iCloud Drive folder
const DEFAULT_VAULT_SUBDIR: &str = "Library/Mobile Documents/com~apple~CloudDocs/SecondBrain";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Which LLM backend classifies captures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Generative Language API
    Gemini,
    /// Local Ollama server
    Ollama,
}

/// LLM backend settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Backend
    pub provider: ProviderKind,

    /// Model name
    pub model: String,

    /// Override the backend's default endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Environment variable holding the API key (Gemini only)
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Gemini,
            model: parabox_llm::gemini::DEFAULT_MODEL.to_string(),
            endpoint: None,
            api_key_env: parabox_llm::gemini::DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

/// Top-level pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Root of the vault
    pub vault_root: PathBuf,

    /// Watched inbox, relative to the vault root
    pub inbox: PathBuf,

    /// Captures processed at the same time
    pub max_concurrent: usize,

    /// Quiet period before a new file is handled (milliseconds)
    pub debounce_ms: u64,

    /// Classifier settings
    pub classifier: ClassifierConfig,

    /// LLM backend settings
    pub llm: LlmConfig,
}

impl Default for IngestConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_default();
        Self {
            vault_root: home.join(DEFAULT_VAULT_SUBDIR),
            inbox: PathBuf::from(DEFAULT_INBOX),
            max_concurrent: 4,
            debounce_ms: 500,
            classifier: ClassifierConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl IngestConfig {
    /// Configuration for a vault at `root`, defaults otherwise
    pub fn for_vault(root: impl Into<PathBuf>) -> Self {
        Self {
            vault_root: root.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: IngestConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vault_root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("vault_root must be set".to_string()));
        }
        if self.inbox.is_absolute() {
            return Err(ConfigError::Invalid(
                "inbox must be relative to vault_root".to_string(),
            ));
        }
        if self.max_concurrent == 0 {
            return Err(ConfigError::Invalid(
                "max_concurrent must be greater than 0".to_string(),
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.model must be set".to_string()));
        }
        self.classifier.validate().map_err(ConfigError::Invalid)
    }

    /// Directory layout of the configured vault
    pub fn layout(&self) -> VaultLayout {
        VaultLayout::new(&self.vault_root).with_inbox(&self.inbox)
    }

    /// Debounce period as a Duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = IngestConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.vault_root.ends_with("SecondBrain"));
        assert_eq!(config.inbox, PathBuf::from("Inbox/notes"));
        assert_eq!(config.llm.provider, ProviderKind::Gemini);
    }

    #[test]
    fn test_partial_toml() {
        let config = IngestConfig::from_toml(
            r#"
            vault_root = "/tmp/vault"
            max_concurrent = 2

            [classifier]
            max_input_chars = 2000

            [llm]
            provider = "ollama"
            model = "llama3"
            "#,
        )
        .unwrap();

        assert_eq!(config.vault_root, PathBuf::from("/tmp/vault"));
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.classifier.max_input_chars, 2000);
        assert_eq!(config.classifier.fallback_summary_chars, 300);
        assert_eq!(config.llm.provider, ProviderKind::Ollama);
        assert_eq!(config.llm.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.layout().inbox(), Path::new("/tmp/vault/Inbox/notes"));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = IngestConfig::from_toml("max_concurrent = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_absolute_inbox_rejected() {
        let result = IngestConfig::from_toml(r#"inbox = "/elsewhere""#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_classifier_validation_propagates() {
        let result = IngestConfig::from_toml("[classifier]\nrequest_timeout_secs = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let result = IngestConfig::from_toml("[llm]\nprovider = \"openai\"");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = IngestConfig::for_vault("/tmp/vault");
        let parsed = IngestConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_from_missing_file() {
        let result = IngestConfig::from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }
}
