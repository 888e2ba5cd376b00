//! Integration tests for the Classifier

#[cfg(test)]
mod tests {
    use crate::{Classifier, ClassifierConfig, ClassifierError};
    use parabox_domain::{Area, ClassificationMetadata, LifeDomain, NoteType};
    use parabox_llm::MockProvider;
    use std::time::Duration;

    const STUB_RESPONSE: &str = r#"{
        "area": "Projects",
        "domain": "Music",
        "type": "idea",
        "title": "Q3 Roadmap",
        "tags": ["music", "roadmap"],
        "summary": "Plan for Q3."
    }"#;

    fn long_text() -> String {
        (0..2_000).map(|i| char::from(b'a' + (i % 26) as u8)).collect()
    }

    #[tokio::test]
    async fn test_successful_classification() {
        let classifier = Classifier::new(MockProvider::new(STUB_RESPONSE), ClassifierConfig::default());

        let meta = classifier
            .classify("Discuss Q3 roadmap for indie music project")
            .await;

        assert_eq!(meta.area, Area::Projects);
        assert_eq!(meta.domain, LifeDomain::Music);
        assert_eq!(meta.note_type, NoteType::Idea);
        assert_eq!(meta.title, "Q3 Roadmap");
    }

    #[tokio::test]
    async fn test_service_error_yields_fallback() {
        let llm = MockProvider::failing();
        let classifier = Classifier::new(llm.clone(), ClassifierConfig::default());
        let text = long_text();

        let meta = classifier.classify(&text).await;

        assert_eq!(meta, ClassificationMetadata::fallback(&text, 300));
        assert_eq!(meta.summary, text[..300]);
        // No retry
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_json_yields_fallback() {
        let classifier = Classifier::new(
            MockProvider::new("```json\n{\"area\": \"Projects\",\n```"),
            ClassifierConfig::default(),
        );

        let meta = classifier.classify("short note").await;

        assert_eq!(meta.area, Area::Resources);
        assert_eq!(meta.domain, LifeDomain::Other);
        assert_eq!(meta.note_type, NoteType::Note);
        assert_eq!(meta.title, "Unclassified Capture");
        assert!(meta.tags.is_empty());
        assert_eq!(meta.summary, "short note");
    }

    #[tokio::test]
    async fn test_missing_field_yields_fallback() {
        let response = STUB_RESPONSE.replace("\"summary\": \"Plan for Q3.\"", "\"note\": \"\"");
        let classifier = Classifier::new(MockProvider::new(response), ClassifierConfig::default());

        assert!(classifier.classify_with_outcome("text").await.used_fallback);
    }

    #[tokio::test]
    async fn test_try_classify_surfaces_error() {
        let classifier = Classifier::new(MockProvider::failing(), ClassifierConfig::default());
        let result = classifier.try_classify("text").await;
        assert!(matches!(result, Err(ClassifierError::Llm(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_yields_fallback() {
        let llm = MockProvider::new(STUB_RESPONSE).with_delay(Duration::from_secs(600));
        let classifier = Classifier::new(llm, ClassifierConfig::default());

        let result = classifier.try_classify("slow").await;
        assert!(matches!(result, Err(ClassifierError::Timeout)));
        assert!(classifier.classify_with_outcome("slow").await.used_fallback);
    }

    #[tokio::test]
    async fn test_input_truncated_before_submission() {
        let llm = MockProvider::new(STUB_RESPONSE);
        let config = ClassifierConfig {
            max_input_chars: 50,
            ..Default::default()
        };
        let classifier = Classifier::new(llm.clone(), config);
        let text = long_text();

        classifier.classify(&text).await;

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains(&text[..50]));
        assert!(!prompt.contains(&text[..51]));
    }

    #[tokio::test]
    async fn test_fallback_summary_uses_configured_length() {
        let config = ClassifierConfig {
            fallback_summary_chars: 10,
            ..Default::default()
        };
        let classifier = Classifier::new(MockProvider::failing(), config);

        let meta = classifier.classify("0123456789abcdef").await;
        assert_eq!(meta.summary, "0123456789");
    }

    #[tokio::test]
    async fn test_fallback_shaped_response_is_not_reported_as_fallback() {
        let response = r#"{
            "area": "Resources",
            "domain": "Other",
            "type": "note",
            "title": "Unclassified Capture",
            "tags": [],
            "summary": "A note the model could not place."
        }"#;
        let classifier = Classifier::new(MockProvider::new(response), ClassifierConfig::default());

        let outcome = classifier.classify_with_outcome("misc").await;

        assert!(!outcome.used_fallback);
        assert_eq!(outcome.metadata.summary, "A note the model could not place.");
    }

    #[tokio::test]
    async fn test_service_error_reported_as_fallback() {
        let classifier = Classifier::new(MockProvider::failing(), ClassifierConfig::default());

        let outcome = classifier.classify_with_outcome("misc").await;

        assert!(outcome.used_fallback);
        assert_eq!(outcome.metadata, ClassificationMetadata::fallback("misc", 300));
    }
}
