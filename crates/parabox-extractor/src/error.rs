//! Error types for text extraction

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting text from a capture
#[derive(Error, Debug)]
pub enum ExtractError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Text file is not valid UTF-8
    #[error("{0} is not valid UTF-8")]
    Encoding(PathBuf),

    /// PDF backend could not produce text
    #[error("PDF extraction failed for {path}: {reason}")]
    Pdf {
        /// File that failed
        path: PathBuf,
        /// Backend message
        reason: String,
    },

    /// Extractor does not handle this file type
    #[error("unsupported file type: {0}")]
    Unsupported(PathBuf),
}
