#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::cancellation::CancellationToken;
    use crate::config::ReferenceContext;
    use crate::errors::QaError;
    use crate::implementations::lexical_index::LexicalIndex;
    use crate::implementations::orchestrator::Orchestrator;
    use crate::models::common::{ Category, MetricKind };
    use crate::models::evaluation::{ BatchScenario, EvaluationRequest };
    use crate::tests::fakes::{
        gateways,
        test_config,
        FixedScores,
        ScriptedInference,
        ARCHITECT,
        AUDITOR,
        DRAFTER,
        ROUTER,
    };
    use crate::traits::qa_system::QaSystem;

    fn system(inference: ScriptedInference, scores: FixedScores) -> Orchestrator {
        Orchestrator::new(
            &test_config(),
            gateways(Arc::new(inference), LexicalIndex::seeded(), Arc::new(scores))
        ).unwrap()
    }

    #[tokio::test]
    async fn test_blank_inputs_are_rejected() {
        let system = system(ScriptedInference::new(), FixedScores::uniform(0.9));
        let cancel = CancellationToken::new();

        assert!(matches!(system.run_pipeline("   ", &cancel).await, Err(QaError::InvalidInput(_))));
        assert!(matches!(system.run_refinement("", &cancel).await, Err(QaError::InvalidInput(_))));
        assert!(
            matches!(
                system.evaluate("q", "ctx", "", &EvaluationRequest::default()).await,
                Err(QaError::InvalidInput(_))
            )
        );
    }

    #[tokio::test]
    async fn test_invalid_engine_options_are_rejected() {
        let mut config = test_config();
        config.engine.threshold = 1.2;
        let result = Orchestrator::new(
            &config,
            gateways(
                Arc::new(ScriptedInference::new()),
                LexicalIndex::seeded(),
                Arc::new(FixedScores::uniform(0.9))
            )
        );
        assert!(matches!(result, Err(QaError::Config(_))));

        let mut config = test_config();
        config.engine.reference_context = ReferenceContext::Fixed("  ".to_string());
        let result = Orchestrator::new(
            &config,
            gateways(
                Arc::new(ScriptedInference::new()),
                LexicalIndex::seeded(),
                Arc::new(FixedScores::uniform(0.9))
            )
        );
        assert!(matches!(result, Err(QaError::Config(_))));
    }

    #[tokio::test]
    async fn test_generate_then_evaluate() {
        let system = system(
            ScriptedInference::new()
                .reply(ROUTER, "security")
                .reply(DRAFTER, "Test Case: confirm passwords are stored as SHA-256 hashes."),
            FixedScores::uniform(0.85)
        );
        let query = "How should I test SHA-256 encryption?";

        let generated = system.run_pipeline(query, &CancellationToken::new()).await.unwrap();
        assert_eq!(generated.category, Category::Security);

        let score = system
            .evaluate(
                query,
                &generated.document.text,
                generated.artifact.as_str(),
                &EvaluationRequest::all_metrics(system.options().threshold)
            ).await
            .unwrap();

        assert!(score.passed);
        assert_eq!(score.metric_passed(MetricKind::AnswerRelevance), Some(true));
        assert_eq!(system.scorer_id(), "fixed-scores");
    }

    #[tokio::test]
    async fn test_refinement_through_facade() {
        let system = system(
            ScriptedInference::new().reply(AUDITOR, "APPROVED").reply(ARCHITECT, "Plan v1"),
            FixedScores::uniform(0.9)
        );

        let result = system
            .run_refinement("Admins must use MFA", &CancellationToken::new()).await
            .unwrap();

        assert!(result.is_approved());
        assert_eq!(result.revision_count(), 1);
    }

    #[tokio::test]
    async fn test_batch_through_facade() {
        let system = system(
            ScriptedInference::new()
                .reply(ROUTER, "technical")
                .reply(DRAFTER, "Test Case: login responds in under 200ms."),
            FixedScores::uniform(0.4)
        );
        let scenarios = vec![
            BatchScenario::new("What is the requirement for API response timeout?", Category::Technical)
        ];

        let results = system.run_batch(&scenarios, &CancellationToken::new()).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, Some(0.4));
        assert!(!results[0].passed);
        assert_eq!(results[0].category_matched, Some(true));
    }
}
