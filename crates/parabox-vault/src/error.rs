//! Error types for vault operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing into the vault
#[derive(Error, Debug)]
pub enum VaultError {
    /// Filesystem operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Note header could not be (de)serialized
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] serde_yaml::Error),

    /// Note document is not in the expected shape
    #[error("Invalid note: {0}")]
    InvalidNote(String),
}

impl VaultError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| VaultError::Io { path, source }
    }
}
