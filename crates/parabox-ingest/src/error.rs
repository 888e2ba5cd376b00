//! Error types for the ingestion pipeline

use crate::config::ConfigError;
use parabox_extractor::ExtractError;
use parabox_llm::LlmError;
use parabox_vault::VaultError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running the pipeline
///
/// `Extract` and `Vault` end the processing of a single capture only.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Text could not be derived from the capture
    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// Directory creation, note write or asset move failed
    #[error("Vault write failed: {0}")]
    Vault(#[from] VaultError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// LLM provider could not be set up
    #[error("LLM setup failed: {0}")]
    Llm(#[from] LlmError),

    /// Filesystem watcher could not be started
    #[error("Watch error: {0}")]
    Watch(String),

    /// The file is neither a PDF nor a text capture
    #[error("Unsupported capture: {}", .0.display())]
    UnsupportedKind(PathBuf),
}
