//! Plain text and markdown extractor.

use crate::error::ExtractError;
use async_trait::async_trait;
use parabox_domain::traits::TextExtractor;
use std::path::Path;
use tokio::fs;

/// Extractor for `.txt` and `.md` captures.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    /// Create a new text extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    type Error = ExtractError;

    fn can_extract(&self, path: &Path) -> bool {
        crate::has_extension(path, &["txt", "md"])
    }

    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = fs::read(path).await.map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        String::from_utf8(bytes).map_err(|_| ExtractError::Encoding(path.to_path_buf()))
    }
}
