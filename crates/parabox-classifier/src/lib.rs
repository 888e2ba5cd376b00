//! Parabox Classifier
//!
//! Assigns PARA metadata to captured text using an LLM, with a deterministic
//! fallback when the service fails.
//!
//! # Architecture
//!
//! ```text
//! Text → truncate → PromptBuilder → LlmProvider → parse + validate → ClassificationMetadata
//!                                        │                │
//!                                        └── error ───────┴──→ fallback metadata
//! ```
//!
//! # Key Features
//!
//! - **Bounded input**: only the first `max_input_chars` characters are sent
//! - **Code-block tolerant parsing**: fenced ```json blocks are unwrapped
//! - **Strict schema**: a response missing any field is rejected
//! - **Never fails**: every failure yields the fallback metadata, no retry
//!
//! # Example Usage
//!
//! ```no_run
//! use parabox_classifier::{Classifier, ClassifierConfig};
//! use parabox_llm::MockProvider;
//!
//! # async fn example() {
//! let llm = MockProvider::new("not json");
//! let classifier = Classifier::new(llm, ClassifierConfig::default());
//!
//! let meta = classifier.classify("Discuss Q3 roadmap").await;
//! assert_eq!(meta.title, "Unclassified Capture");
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod parser;
mod prompt;

#[cfg(test)]
mod tests;

pub use classifier::{truncate_chars, Classification, Classifier};
pub use config::ClassifierConfig;
pub use error::ClassifierError;
pub use parser::parse_classification;
pub use prompt::PromptBuilder;
