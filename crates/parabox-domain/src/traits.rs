//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its collaborators.
//! Implementations live in other crates.

use async_trait::async_trait;
use std::path::Path;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (parabox-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::fmt::Display + Send;

    /// Submit a prompt and return the raw response text
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Model identifier, recorded in logs
    fn model_name(&self) -> &str;
}

/// Trait for turning a file into plain text
///
/// Implemented by the infrastructure layer (parabox-extractor)
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Error type for extraction
    type Error: std::fmt::Display + Send;

    /// Whether this extractor handles the file, judged by extension
    fn can_extract(&self, path: &Path) -> bool;

    /// Extract the text content of the file
    async fn extract(&self, path: &Path) -> Result<String, Self::Error>;
}
