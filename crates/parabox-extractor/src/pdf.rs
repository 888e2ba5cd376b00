//! PDF content extractor.
//!
//! Uses pdf-extract to pull the text layer. Parsing runs on the blocking pool.

use crate::error::ExtractError;
use async_trait::async_trait;
use parabox_domain::traits::TextExtractor;
use std::path::Path;
use tracing::debug;

/// Extractor for PDF files.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    type Error = ExtractError;

    fn can_extract(&self, path: &Path) -> bool {
        crate::has_extension(path, &["pdf"])
    }

    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        debug!("Extracting PDF: {:?}", path);

        let bytes = tokio::fs::read(path).await.map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // pdf-extract panics on some malformed input; a panic surfaces as a join error
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| ExtractError::Pdf {
            path: path.to_path_buf(),
            reason: format!("backend task failed: {e}"),
        })?
        .map_err(|reason| ExtractError::Pdf {
            path: path.to_path_buf(),
            reason,
        })?;

        debug!("Extracted {} chars from {:?}", text.chars().count(), path);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_can_extract_by_extension() {
        let extractor = PdfExtractor::new();
        assert!(extractor.can_extract(Path::new("/inbox/scan.pdf")));
        assert!(extractor.can_extract(Path::new("/inbox/scan.PDF")));
        assert!(!extractor.can_extract(Path::new("/inbox/scan.txt")));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf at all").unwrap();

        let result = PdfExtractor::new().extract(&path).await;
        assert!(matches!(result, Err(ExtractError::Pdf { .. })));
    }

    #[tokio::test]
    async fn test_missing_pdf_fails_with_io() {
        let dir = tempdir().unwrap();
        let result = PdfExtractor::new().extract(&dir.path().join("nope.pdf")).await;
        assert!(matches!(result, Err(ExtractError::Io { .. })));
    }
}
