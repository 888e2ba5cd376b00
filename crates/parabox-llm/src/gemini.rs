//! Gemini Provider Implementation
//!
//! Talks to Google's Generative Language REST API. This is the default
//! classification backend.
//!
//! # Examples
//!
//! ```no_run
//! use parabox_llm::GeminiProvider;
//!
//! # async fn example() -> Result<(), parabox_llm::LlmError> {
//! let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
//! let provider = GeminiProvider::new(
//!     "https://generativelanguage.googleapis.com",
//!     "gemini-2.5-pro",
//!     api_key,
//! );
//! for model in provider.list_models().await? {
//!     println!("{} | {}", model.name, model.supported_generation_methods.join(","));
//! }
//! # Ok(())
//! # }
//! ```

use crate::LlmError;
use async_trait::async_trait;
use parabox_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Generative Language API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default timeout for requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Gemini API provider
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

/// A model advertised by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Resource name, e.g. `models/gemini-2.5-pro`
    pub name: String,

    /// Methods the model supports, e.g. `generateContent`
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// `model` may be given with or without the `models/` prefix.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_timeout(endpoint, model, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a provider with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let model = model.into();
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model,
            api_key: api_key.into(),
            client,
        }
    }

    /// Generate text for a single user prompt
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text = first_candidate_text(parsed);
        debug!("Gemini response length: {} chars", text.len());
        Ok(text)
    }

    /// List the models available to this API key
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        let url = format!("{}/v1/models", self.endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(LlmError::Communication(format!("HTTP {}: {}", status, raw)));
        }

        serde_json::from_str::<ListModelsResponse>(&raw)
            .map(|r| r.models)
            .map_err(|e| {
                LlmError::InvalidResponse(format!("Failed to parse model list: {} (raw: {})", e, raw))
            })
    }
}

/// Text of the first part of the first candidate, empty when absent
fn first_candidate_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .unwrap_or_default()
}

#[async_trait]
impl LlmProviderTrait for GeminiProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        GeminiProvider::generate(self, prompt).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_prefix_stripped() {
        let provider = GeminiProvider::new(DEFAULT_ENDPOINT, "models/gemini-2.5-pro", "k");
        assert_eq!(provider.model, "gemini-2.5-pro");

        let provider = GeminiProvider::new("http://localhost:8080/", "gemini-2.5-flash", "k");
        assert_eq!(provider.model, "gemini-2.5-flash");
        assert_eq!(provider.endpoint, "http://localhost:8080");
    }

    #[test]
    fn test_first_candidate_text() {
        let json = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other candidate"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(first_candidate_text(parsed), "first");
    }

    #[test]
    fn test_first_candidate_text_missing() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(first_candidate_text(parsed), "");

        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(first_candidate_text(parsed), "");
    }

    #[test]
    fn test_model_list_shape() {
        let json = r#"{"models":[
            {"name":"models/gemini-2.5-pro","supportedGenerationMethods":["generateContent","countTokens"]}
        ]}"#;
        let parsed: ListModelsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.models[0].name, "models/gemini-2.5-pro");
        assert_eq!(
            parsed.models[0].supported_generation_methods,
            vec!["generateContent", "countTokens"]
        );
    }

    #[tokio::test]
    async fn test_gemini_error_handling() {
        let provider = GeminiProvider::new("http://localhost:99999", DEFAULT_MODEL, "k");
        let result = provider.generate("test").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
