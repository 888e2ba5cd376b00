//! Configuration for the Classifier

use parabox_domain::metadata::DEFAULT_FALLBACK_SUMMARY_CHARS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Characters of extracted text submitted for classification
    pub max_input_chars: usize,

    /// Characters of text kept as the summary of fallback metadata
    pub fallback_summary_chars: usize,

    /// Maximum time for a single classification call (seconds)
    pub request_timeout_secs: u64,
}

impl ClassifierConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_chars == 0 {
            return Err("max_input_chars must be greater than 0".to_string());
        }
        if self.fallback_summary_chars == 0 {
            return Err("fallback_summary_chars must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 10_000,
            fallback_summary_chars: DEFAULT_FALLBACK_SUMMARY_CHARS,
            request_timeout_secs: 120,
        }
    }
}
