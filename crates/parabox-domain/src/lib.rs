//! Parabox Domain Layer
//!
//! Core data model for the capture pipeline and the trait boundaries to its
//! external collaborators.
//!
//! ## Key Concepts
//!
//! - **Capture**: A file that arrived in the inbox, tagged with its [`CaptureKind`]
//! - **Classification metadata**: Where a capture belongs in the PARA taxonomy
//!   (area, life domain, note type) plus title, tags and summary
//! - **Fallback metadata**: The degraded classification used when the service fails
//!
//! ## Architecture
//!
//! Infrastructure lives in other crates:
//! - `parabox-llm` implements [`traits::LlmProvider`]
//! - `parabox-extractor` implements [`traits::TextExtractor`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capture;
pub mod metadata;
pub mod traits;

// Re-exports for convenience
pub use capture::{CaptureItem, CaptureKind};
pub use metadata::{Area, ClassificationMetadata, LifeDomain, NoteType};
