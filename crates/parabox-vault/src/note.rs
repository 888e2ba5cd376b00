//! Note document: YAML frontmatter header plus summary body

use crate::error::VaultError;
use chrono::{DateTime, Utc};
use parabox_domain::ClassificationMetadata;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the note inside a destination directory
pub const NOTE_FILE_NAME: &str = "index.md";

const DELIMITER: &str = "---\n";

/// Header block of a note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteHeader {
    /// When the capture was filed
    pub captured_at: DateTime<Utc>,

    /// Classification the note was filed under
    #[serde(flatten)]
    pub metadata: ClassificationMetadata,

    /// Where the original file was found
    pub source_path: PathBuf,
}

/// A persisted note
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Structured header
    pub header: NoteHeader,

    /// Body text (the summary)
    pub body: String,
}

impl Note {
    /// Build the note for a classified capture
    pub fn new(
        metadata: ClassificationMetadata,
        source_path: impl Into<PathBuf>,
        captured_at: DateTime<Utc>,
    ) -> Self {
        let body = metadata.summary.clone();
        Self {
            header: NoteHeader {
                captured_at,
                metadata,
                source_path: source_path.into(),
            },
            body,
        }
    }

    /// Render as `---\n<yaml>---\n\n<body>\n`
    pub fn render(&self) -> Result<String, VaultError> {
        let yaml = serde_yaml::to_string(&self.header)?;
        Ok(format!("{DELIMITER}{yaml}{DELIMITER}\n{}\n", self.body))
    }

    /// Parse a rendered note back into header and body
    pub fn parse(document: &str) -> Result<Self, VaultError> {
        let rest = document
            .strip_prefix(DELIMITER)
            .ok_or_else(|| VaultError::InvalidNote("missing opening delimiter".to_string()))?;

        let end = rest
            .find("\n---\n")
            .ok_or_else(|| VaultError::InvalidNote("missing closing delimiter".to_string()))?;

        let header: NoteHeader = serde_yaml::from_str(&rest[..=end])?;

        let after = &rest[end + 1 + DELIMITER.len()..];
        let body = after.strip_prefix('\n').unwrap_or(after);
        let body = body.strip_suffix('\n').unwrap_or(body);

        Ok(Self {
            header,
            body: body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use parabox_domain::{Area, LifeDomain, NoteType};

    fn sample_metadata() -> ClassificationMetadata {
        ClassificationMetadata {
            area: Area::Projects,
            domain: LifeDomain::Music,
            note_type: NoteType::Idea,
            title: "Q3 Roadmap".to_string(),
            tags: vec!["music".to_string(), "roadmap".to_string()],
            summary: "Plan for Q3.".to_string(),
        }
    }

    fn sample_note() -> Note {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
        Note::new(sample_metadata(), "/vault/Inbox/notes/meeting.txt", at)
    }

    #[test]
    fn test_render_layout() {
        let rendered = sample_note().render().unwrap();

        assert!(rendered.starts_with("---\ncaptured_at: "));
        assert!(rendered.ends_with("---\n\nPlan for Q3.\n"));
        assert!(rendered.contains("\narea: Projects\n"));
        assert!(rendered.contains("\ndomain: Music\n"));
        assert!(rendered.contains("\ntype: idea\n"));
        assert!(rendered.contains("\ntitle: Q3 Roadmap\n"));
        assert!(rendered.contains("\nsource_path: /vault/Inbox/notes/meeting.txt\n"));
    }

    #[test]
    fn test_parse_reproduces_header_and_body() {
        let note = sample_note();
        let parsed = Note::parse(&note.render().unwrap()).unwrap();
        assert_eq!(parsed, note);
    }

    #[test]
    fn test_summary_with_delimiter_like_text() {
        let mut metadata = sample_metadata();
        metadata.summary = "Line one\n---\nline three".to_string();
        let note = Note::new(metadata, "/in/x.md", Utc::now());

        let parsed = Note::parse(&note.render().unwrap()).unwrap();
        assert_eq!(parsed.header.metadata.summary, "Line one\n---\nline three");
        assert_eq!(parsed.body, "Line one\n---\nline three");
    }

    #[test]
    fn test_fallback_header_has_empty_tags() {
        let metadata = ClassificationMetadata::fallback("raw text", 300);
        let rendered = Note::new(metadata, "/in/x.txt", Utc::now()).render().unwrap();
        assert!(rendered.contains("\ntags: []\n"));
        assert!(rendered.contains("\ntitle: Unclassified Capture\n"));
    }

    #[test]
    fn test_parse_rejects_plain_markdown() {
        assert!(matches!(
            Note::parse("# Just a heading\n"),
            Err(VaultError::InvalidNote(_))
        ));
        assert!(matches!(
            Note::parse("---\narea: Projects\n"),
            Err(VaultError::InvalidNote(_))
        ));
    }
}
