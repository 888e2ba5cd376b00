//! Parse LLM output into classification metadata

use crate::error::ClassifierError;
use parabox_domain::ClassificationMetadata;
use serde_json::Value;

const REQUIRED_FIELDS: [&str; 6] = ["area", "domain", "type", "title", "tags", "summary"];

/// Parse an LLM response into validated metadata
///
/// A fenced code block anywhere in the response wins over the raw text.
pub fn parse_classification(response: &str) -> Result<ClassificationMetadata, ClassifierError> {
    let json_str = extract_json(response);

    let json: Value = serde_json::from_str(json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| ClassifierError::InvalidFormat("Expected JSON object".to_string()))?;

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| obj.get(*field).map_or(true, Value::is_null))
        .collect();
    if !missing.is_empty() {
        return Err(ClassifierError::InvalidFormat(format!(
            "Missing field(s): {}",
            missing.join(", ")
        )));
    }

    let metadata: ClassificationMetadata = serde_json::from_value(json)
        .map_err(|e| ClassifierError::InvalidFormat(e.to_string()))?;

    Ok(metadata.normalized())
}

/// Extract JSON from a response, unwrapping the first fenced code block
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };
    let after = &trimmed[start + 3..];
    let Some(end) = after.find("```") else {
        return trimmed;
    };

    let block = after[..end].trim_start();
    let block = match block.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &block[4..],
        _ => block,
    };
    block.trim()
}
