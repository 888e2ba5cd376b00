//! Classifier invocation and fallback policy

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;
use crate::parser::parse_classification;
use crate::prompt::PromptBuilder;
use parabox_domain::traits::LlmProvider;
use parabox_domain::ClassificationMetadata;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Longest prefix of `text` holding at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Metadata for one capture, and whether it is the fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Metadata the capture is filed under
    pub metadata: ClassificationMetadata,

    /// Set when the service call or its response failed
    pub used_fallback: bool,
}

/// Classifies captured text into PARA metadata
///
/// From the caller's point of view classification always succeeds: any
/// failure of the service call or of the response yields the fallback
/// metadata. There is no retry.
pub struct Classifier<L>
where
    L: LlmProvider,
{
    llm: Arc<L>,
    config: ClassifierConfig,
}

impl<L> Classifier<L>
where
    L: LlmProvider,
{
    /// Create a new Classifier
    pub fn new(llm: L, config: ClassifierConfig) -> Self {
        Self::from_arc(Arc::new(llm), config)
    }

    /// Create a Classifier sharing an existing provider
    pub fn from_arc(llm: Arc<L>, config: ClassifierConfig) -> Self {
        Self { llm, config }
    }

    /// Classify text, substituting the fallback metadata on any failure
    pub async fn classify(&self, text: &str) -> ClassificationMetadata {
        self.classify_with_outcome(text).await.metadata
    }

    /// Like [`Classifier::classify`], also reporting whether the fallback was used
    pub async fn classify_with_outcome(&self, text: &str) -> Classification {
        let input = truncate_chars(text, self.config.max_input_chars);

        match self.classify_prefix(input).await {
            Ok(metadata) => {
                info!(
                    "Classified as {}/{} ({}): {:?}",
                    metadata.area, metadata.domain, metadata.note_type, metadata.title
                );
                Classification {
                    metadata,
                    used_fallback: false,
                }
            }
            Err(e) => {
                warn!("Classification fallback used: {}", e);
                Classification {
                    metadata: ClassificationMetadata::fallback(
                        input,
                        self.config.fallback_summary_chars,
                    ),
                    used_fallback: true,
                }
            }
        }
    }

    /// Classify text without the fallback, surfacing the failure reason
    pub async fn try_classify(&self, text: &str) -> Result<ClassificationMetadata, ClassifierError> {
        self.classify_prefix(truncate_chars(text, self.config.max_input_chars))
            .await
    }

    async fn classify_prefix(&self, input: &str) -> Result<ClassificationMetadata, ClassifierError> {
        let prompt = PromptBuilder::new(input).build();

        debug!(
            "Submitting {} chars to {} (prompt {} chars)",
            input.chars().count(),
            self.llm.model_name(),
            prompt.len()
        );

        let raw = timeout(self.config.request_timeout(), self.llm.generate(&prompt))
            .await
            .map_err(|_| ClassifierError::Timeout)?
            .map_err(|e| ClassifierError::Llm(e.to_string()))?;

        debug!("LLM raw response: {}", raw);

        parse_classification(&raw)
    }
}
