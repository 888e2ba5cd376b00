//! Parabox Extractor
//!
//! Turns a captured file into plain text for classification.
//!
//! - [`PdfExtractor`]: text layer of a PDF, via `pdf-extract`
//! - [`PlainTextExtractor`]: direct UTF-8 read of `.txt` / `.md` files
//!
//! Both implement [`parabox_domain::traits::TextExtractor`] and fail with
//! [`ExtractError`].

#![warn(missing_docs)]

mod error;
mod pdf;
mod text;

pub use error::ExtractError;
pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;

use std::path::Path;

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}
