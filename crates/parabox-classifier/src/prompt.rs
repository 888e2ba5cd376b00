//! LLM prompt for capture classification

use parabox_domain::{Area, LifeDomain};

/// Builds the classification prompt for one capture
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for already-truncated text
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete classification prompt
    pub fn build(&self) -> String {
        let areas = join(Area::ALL.iter().map(|a| a.as_str()));
        let domains = join(LifeDomain::ALL.iter().map(|d| d.as_str()));

        let mut prompt = String::with_capacity(self.text.len() + 512);

        prompt.push_str("Return STRICT JSON ONLY:\n\n");
        prompt.push_str("{\n");
        prompt.push_str(&format!("  \"area\": \"{}\",\n", areas));
        prompt.push_str(&format!("  \"domain\": \"{}\",\n", domains));
        prompt.push_str("  \"type\": \"idea|task|note|reflection|resource\",\n");
        prompt.push_str("  \"title\": \"short title <= 10 words\",\n");
        prompt.push_str("  \"tags\": [\"lowercase\",\"keywords\"],\n");
        prompt.push_str("  \"summary\": \"2-3 sentence summary\"\n");
        prompt.push_str("}\n\n");
        prompt.push_str(RULES);
        prompt.push_str("\n\nTEXT:\n");
        prompt.push_str(self.text);
        prompt.push('\n');

        prompt
    }
}

fn join<'s>(names: impl Iterator<Item = &'s str>) -> String {
    names.collect::<Vec<_>>().join("|")
}

const RULES: &str = r#"Rules:
- Pick exactly one value for area, domain and type from the listed options
- area follows PARA: Projects have a goal and an end, Areas are ongoing responsibilities,
  Resources are reference material, Archives are inactive
- Use "Other" for domain when none of the listed domains fits
- Every field is required; tags may be an empty array"#;
