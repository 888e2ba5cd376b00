//! Classification metadata - where a capture belongs in the taxonomy

use serde::{Deserialize, Serialize};

/// Title used when the classifier could not produce one
pub const FALLBACK_TITLE: &str = "Unclassified Capture";

/// Default number of characters of source text kept as the fallback summary
pub const DEFAULT_FALLBACK_SUMMARY_CHARS: usize = 300;

/// Top-level PARA bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Area {
    /// Active efforts with a goal and an end
    Projects,

    /// Ongoing responsibilities
    Areas,

    /// Reference material
    Resources,

    /// Inactive items
    Archives,
}

impl Area {
    /// All areas, in taxonomy order
    pub const ALL: [Area; 4] = [Area::Projects, Area::Areas, Area::Resources, Area::Archives];

    /// Directory name under the vault root
    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Projects => "Projects",
            Area::Areas => "Areas",
            Area::Resources => "Resources",
            Area::Archives => "Archives",
        }
    }

    /// Parse an area name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "projects" => Some(Area::Projects),
            "areas" => Some(Area::Areas),
            "resources" => Some(Area::Resources),
            "archives" => Some(Area::Archives),
            _ => None,
        }
    }
}

impl TryFrom<String> for Area {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("Invalid area: {}", value))
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Life domain tag
///
/// Unknown names collapse to [`LifeDomain::Other`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum LifeDomain {
    /// Music
    Music,
    /// Career
    Career,
    /// Health
    Health,
    /// Finances
    Finances,
    /// Creativity
    Creativity,
    /// Relationships
    Relationships,
    /// Anything outside the named domains
    Other,
}

impl LifeDomain {
    /// All domains, `Other` last
    pub const ALL: [LifeDomain; 7] = [
        LifeDomain::Music,
        LifeDomain::Career,
        LifeDomain::Health,
        LifeDomain::Finances,
        LifeDomain::Creativity,
        LifeDomain::Relationships,
        LifeDomain::Other,
    ];

    /// Get the domain name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LifeDomain::Music => "Music",
            LifeDomain::Career => "Career",
            LifeDomain::Health => "Health",
            LifeDomain::Finances => "Finances",
            LifeDomain::Creativity => "Creativity",
            LifeDomain::Relationships => "Relationships",
            LifeDomain::Other => "Other",
        }
    }

    /// Parse a domain name (case-insensitive), `Other` for anything unknown
    pub fn parse(s: &str) -> Self {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(needle))
            .unwrap_or(LifeDomain::Other)
    }
}

impl From<String> for LifeDomain {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl std::fmt::Display for LifeDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of note a capture becomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum NoteType {
    /// An idea worth keeping
    Idea,
    /// Something to do
    Task,
    /// General note
    Note,
    /// Personal reflection
    Reflection,
    /// Reference resource
    Resource,
}

impl NoteType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Idea => "idea",
            NoteType::Task => "task",
            NoteType::Note => "note",
            NoteType::Reflection => "reflection",
            NoteType::Resource => "resource",
        }
    }

    /// Parse a type name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "idea" => Some(NoteType::Idea),
            "task" => Some(NoteType::Task),
            "note" => Some(NoteType::Note),
            "reflection" => Some(NoteType::Reflection),
            "resource" => Some(NoteType::Resource),
            _ => None,
        }
    }
}

impl TryFrom<String> for NoteType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("Invalid note type: {}", value))
    }
}

impl std::fmt::Display for NoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured result of classifying a capture
///
/// Every field is required when deserializing; a response missing any of them
/// is rejected as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationMetadata {
    /// Top-level taxonomy bucket
    pub area: Area,

    /// Life domain tag
    pub domain: LifeDomain,

    /// Note type
    #[serde(rename = "type")]
    pub note_type: NoteType,

    /// Short human label
    pub title: String,

    /// Lowercase keywords
    pub tags: Vec<String>,

    /// Two or three sentence summary
    pub summary: String,
}

impl ClassificationMetadata {
    /// Degraded metadata used when classification fails
    ///
    /// The summary is the first `summary_chars` characters of `text`.
    pub fn fallback(text: &str, summary_chars: usize) -> Self {
        Self {
            area: Area::Resources,
            domain: LifeDomain::Other,
            note_type: NoteType::Note,
            title: FALLBACK_TITLE.to_string(),
            tags: Vec::new(),
            summary: text.chars().take(summary_chars).collect(),
        }
    }

    /// Normalize tags: trimmed, lowercase, no empties, first occurrence wins
    pub fn normalized(mut self) -> Self {
        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags.drain(..) {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        self.tags = tags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_values() {
        let text = "x".repeat(1000);
        let meta = ClassificationMetadata::fallback(&text, DEFAULT_FALLBACK_SUMMARY_CHARS);
        assert_eq!(meta.area, Area::Resources);
        assert_eq!(meta.domain, LifeDomain::Other);
        assert_eq!(meta.note_type, NoteType::Note);
        assert_eq!(meta.title, "Unclassified Capture");
        assert!(meta.tags.is_empty());
        assert_eq!(meta.summary.chars().count(), 300);
    }

    #[test]
    fn test_fallback_summary_counts_chars_not_bytes() {
        let text = "é".repeat(400);
        let meta = ClassificationMetadata::fallback(&text, 300);
        assert_eq!(meta.summary, "é".repeat(300));
    }

    #[test]
    fn test_deserialize_full_object() {
        let json = r#"{
            "area": "Projects",
            "domain": "Music",
            "type": "idea",
            "title": "Q3 Roadmap",
            "tags": ["music", "roadmap"],
            "summary": "Plan for Q3."
        }"#;
        let meta: ClassificationMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.area, Area::Projects);
        assert_eq!(meta.domain, LifeDomain::Music);
        assert_eq!(meta.note_type, NoteType::Idea);
        assert_eq!(meta.tags, vec!["music", "roadmap"]);
    }

    #[test]
    fn test_unknown_domain_becomes_other() {
        let json = r#"{"area":"areas","domain":"Gardening","type":"Task",
            "title":"t","tags":[],"summary":"s"}"#;
        let meta: ClassificationMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.area, Area::Areas);
        assert_eq!(meta.domain, LifeDomain::Other);
        assert_eq!(meta.note_type, NoteType::Task);
    }

    #[test]
    fn test_unknown_area_rejected() {
        let json = r#"{"area":"Someday","domain":"Music","type":"idea",
            "title":"t","tags":[],"summary":"s"}"#;
        assert!(serde_json::from_str::<ClassificationMetadata>(json).is_err());
    }

    #[test]
    fn test_missing_field_rejected() {
        let json = r#"{"area":"Projects","domain":"Music","type":"idea","title":"t"}"#;
        assert!(serde_json::from_str::<ClassificationMetadata>(json).is_err());
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let meta = ClassificationMetadata::fallback("abc", 300);
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["area"], "Resources");
        assert_eq!(value["domain"], "Other");
        assert_eq!(value["type"], "note");
    }

    #[test]
    fn test_normalize_tags() {
        let mut meta = ClassificationMetadata::fallback("", 300);
        meta.tags = vec![
            " Music ".to_string(),
            "music".to_string(),
            "".to_string(),
            "Roadmap".to_string(),
        ];
        let meta = meta.normalized();
        assert_eq!(meta.tags, vec!["music", "roadmap"]);
    }
}
