//! Error types for the Classifier

use thiserror::Error;

/// Reasons a classification attempt did not produce metadata
///
/// These never reach the pipeline: `Classifier::classify` turns every one of
/// them into the fallback metadata.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Service call exceeded the request timeout
    #[error("Classification timeout")]
    Timeout,

    /// Response was not JSON
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Response was JSON but did not match the metadata schema
    #[error("Invalid metadata format: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for ClassifierError {
    fn from(e: serde_json::Error) -> Self {
        ClassifierError::JsonParse(e.to_string())
    }
}
