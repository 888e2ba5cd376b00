//! Capture module - files discovered in the inbox

use std::path::{Path, PathBuf};

/// Kind of capture, derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureKind {
    /// `.pdf` documents, text comes from the PDF backend
    Pdf,

    /// `.txt` and `.md` files, read directly
    Text,

    /// Anything else; left untouched in the inbox
    Unrecognized,
}

impl CaptureKind {
    /// Classify a path by its extension (case-insensitive)
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("pdf") => CaptureKind::Pdf,
            Some("txt") | Some("md") => CaptureKind::Text,
            _ => CaptureKind::Unrecognized,
        }
    }

    /// Fixed file name the original asset gets inside its destination directory
    pub fn asset_name(&self) -> Option<&'static str> {
        match self {
            CaptureKind::Pdf => Some("asset.pdf"),
            CaptureKind::Text => Some("original.txt"),
            CaptureKind::Unrecognized => None,
        }
    }

    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureKind::Pdf => "pdf",
            CaptureKind::Text => "text",
            CaptureKind::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for CaptureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file discovered in the inbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureItem {
    path: PathBuf,
    kind: CaptureKind,
}

impl CaptureItem {
    /// Create a capture item, deriving its kind from the path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = CaptureKind::from_path(&path);
        Self { path, kind }
    }

    /// Current location of the capture
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Kind determined at discovery
    pub fn kind(&self) -> CaptureKind {
        self.kind
    }
}
