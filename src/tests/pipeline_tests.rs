#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::cancellation::CancellationToken;
    use crate::errors::{ GatewayError, QaError };
    use crate::implementations::classifier::Classifier;
    use crate::implementations::drafter::Drafter;
    use crate::implementations::lexical_index::LexicalIndex;
    use crate::implementations::pipeline::PipelineCoordinator;
    use crate::implementations::retriever::Retriever;
    use crate::models::common::Category;
    use crate::models::trace::TraceEvent;
    use crate::tests::fakes::{ test_config, ScriptedInference, DRAFTER, ROUTER };

    const SHA_QUERY: &str = "How should I test SHA-256 encryption?";

    fn coordinator(inference: Arc<ScriptedInference>, index: LexicalIndex) -> PipelineCoordinator {
        let config = test_config();
        PipelineCoordinator::new(
            Classifier::new(inference.clone(), &config).unwrap(),
            Retriever::new(Arc::new(index)),
            Drafter::new(inference, &config).unwrap(),
            "scripted-model".to_string()
        )
    }

    #[tokio::test]
    async fn test_classify_normalizes_gateway_answer() {
        let inference = Arc::new(ScriptedInference::new().reply(ROUTER, "  Security\n"));
        let classifier = Classifier::new(inference.clone(), &test_config()).unwrap();

        let category = classifier.classify(SHA_QUERY).await.unwrap();

        assert_eq!(category, Category::Security);
        let prompt = &inference.prompts()[0];
        assert!(prompt.contains(SHA_QUERY));
        assert!(prompt.contains("'security'"));
        assert!(prompt.contains("'technical'"));
    }

    #[tokio::test]
    async fn test_classify_rejects_unknown_label() {
        let inference = Arc::new(ScriptedInference::new().reply(ROUTER, "billing"));
        let classifier = Classifier::new(inference, &test_config()).unwrap();

        match classifier.classify("How do refunds work?").await {
            Err(QaError::Classification { label }) => assert_eq!(label, "billing"),
            other => panic!("expected classification error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_classify_propagates_auth_failure() {
        let inference = Arc::new(
            ScriptedInference::new().on(ROUTER, vec![Err(GatewayError::auth("LLM API", "HTTP 401"))])
        );
        let classifier = Classifier::new(inference, &test_config()).unwrap();

        assert!(matches!(classifier.classify(SHA_QUERY).await, Err(QaError::Auth(_))));
    }

    #[tokio::test]
    async fn test_retrieve_returns_none_for_empty_category() {
        let mut index = LexicalIndex::new();
        index.add("Rule: API response time for login must be under 200ms.", &[("category", "technical")]);
        let retriever = Retriever::new(Arc::new(index));

        let document = retriever.retrieve(SHA_QUERY, Category::Security).await.unwrap();

        assert!(document.is_none());
    }

    #[tokio::test]
    async fn test_sha256_scenario_end_to_end() {
        let inference = Arc::new(
            ScriptedInference::new()
                .reply(ROUTER, "security")
                .reply(
                    DRAFTER,
                    "Test Case: verify stored passwords are SHA-256 digests, never plain text."
                )
        );
        let pipeline = coordinator(inference.clone(), LexicalIndex::seeded());

        let result = pipeline.run(SHA_QUERY, &CancellationToken::new()).await.unwrap();

        assert_eq!(result.category, Category::Security);
        assert_eq!(result.document.text, "Rule: Passwords must be encrypted using SHA-256.");
        assert!(!result.artifact.is_empty());
        assert!(result.artifact.as_str().contains("SHA-256"));

        let draft_prompts = inference.prompts_matching(DRAFTER);
        assert_eq!(draft_prompts.len(), 1);
        assert!(draft_prompts[0].contains("Passwords must be encrypted using SHA-256"));

        assert!(result.trace.elapsed_ms().is_some());
        assert_eq!(result.trace.model, "scripted-model");
        assert!(matches!(result.trace.events()[0], TraceEvent::Routed { .. }));
        assert_eq!(result.trace.events().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_grounding_stops_before_drafting() {
        let inference = Arc::new(
            ScriptedInference::new()
                .reply(ROUTER, "technical")
                .reply(DRAFTER, "should never be drafted")
        );
        let mut index = LexicalIndex::new();
        index.add("Rule: Passwords must be encrypted using SHA-256.", &[("category", "security")]);
        let pipeline = coordinator(inference.clone(), index);

        let result = pipeline.run("How fast must login respond?", &CancellationToken::new()).await;

        match result {
            Err(QaError::NoGrounding { category }) => assert_eq!(category, "technical"),
            other => panic!("expected NoGrounding, got {:?}", other.map(|r| r.artifact)),
        }
        assert!(inference.prompts_matching(DRAFTER).is_empty());
    }

    #[tokio::test]
    async fn test_drafter_failure_is_generation_error() {
        let inference = Arc::new(
            ScriptedInference::new()
                .reply(ROUTER, "security")
                .on(DRAFTER, vec![Err(GatewayError::transient("LLM API", "HTTP 503"))])
        );
        let pipeline = coordinator(inference, LexicalIndex::seeded());

        match pipeline.run(SHA_QUERY, &CancellationToken::new()).await {
            Err(QaError::Generation { stage, .. }) => assert_eq!(stage, "drafting"),
            other => panic!("expected generation error, got {:?}", other.map(|r| r.artifact)),
        }
    }

    #[tokio::test]
    async fn test_cancelled_pipeline_issues_no_calls() {
        let inference = Arc::new(ScriptedInference::new().reply(ROUTER, "security"));
        let pipeline = coordinator(inference.clone(), LexicalIndex::seeded());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = pipeline.run(SHA_QUERY, &cancel).await;

        assert!(matches!(result, Err(QaError::Cancelled { .. })));
        assert!(inference.prompts().is_empty());
    }
}
