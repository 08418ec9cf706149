#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::errors::{ GatewayError, QaError };
    use crate::implementations::evaluator::EvaluationHarness;
    use crate::models::common::MetricKind;
    use crate::models::evaluation::EvaluationRequest;
    use crate::tests::fakes::FixedScores;

    const QUERY: &str = "How should I test SHA-256 encryption?";
    const CONTEXT: &str = "Standard: Use SHA-256 for encryption and 200ms for API timeouts.";
    const OUTPUT: &str = "Verify that stored credentials are SHA-256 digests.";

    fn harness(scores: FixedScores) -> (EvaluationHarness, Arc<FixedScores>) {
        let scores = Arc::new(scores);
        (EvaluationHarness::new(scores.clone()), scores)
    }

    #[tokio::test]
    async fn test_all_metrics_are_scored() {
        let (harness, scores) = harness(FixedScores::uniform(0.9));

        let score = harness
            .evaluate(QUERY, CONTEXT, OUTPUT, &EvaluationRequest::all_metrics(0.7)).await
            .unwrap();

        assert!((score.faithfulness - 0.9).abs() < f32::EPSILON);
        assert!(score.answer_relevance.is_some());
        assert!(score.contextual_relevance.is_some());
        assert!(score.passed);
        assert_eq!(score.scorer, "fixed-scores");
        assert_eq!(scores.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_faithfulness_only_leaves_other_metrics_empty() {
        let (harness, scores) = harness(FixedScores::uniform(0.8));

        let score = harness
            .evaluate(QUERY, CONTEXT, OUTPUT, &EvaluationRequest::default()).await
            .unwrap();

        assert_eq!(score.answer_relevance, None);
        assert_eq!(score.contextual_relevance, None);
        assert_eq!(score.metric_passed(MetricKind::AnswerRelevance), None);
        assert_eq!(scores.calls(), vec![MetricKind::Faithfulness]);
    }

    #[tokio::test]
    async fn test_one_failing_metric_fails_whole_evaluation() {
        let (harness, scores) = harness(
            FixedScores::uniform(0.9).with(
                MetricKind::AnswerRelevance,
                Err(GatewayError::transient("LLM judge", "HTTP 503"))
            )
        );

        let result = harness.evaluate(
            QUERY,
            CONTEXT,
            OUTPUT,
            &EvaluationRequest::all_metrics(0.7)
        ).await;

        match result {
            Err(QaError::Evaluation(message)) => assert!(message.contains("answer_relevance")),
            other => panic!("expected evaluation error, got {:?}", other),
        }
        // The other metrics still ran to completion
        let calls = scores.calls();
        assert_eq!(calls.len(), 3);
        assert!(MetricKind::ALL.iter().all(|m| calls.contains(m)));
    }

    #[tokio::test]
    async fn test_threshold_decides_pass_and_per_metric_verdicts() {
        let scores = FixedScores::uniform(0.9).with(MetricKind::ContextualRelevance, Ok(0.5));
        let (harness, _) = harness(scores);

        let score = harness
            .evaluate(QUERY, CONTEXT, OUTPUT, &EvaluationRequest::all_metrics(0.7)).await
            .unwrap();

        assert!(!score.passed);
        assert_eq!(score.metric_passed(MetricKind::Faithfulness), Some(true));
        assert_eq!(score.metric_passed(MetricKind::ContextualRelevance), Some(false));

        let lenient = harness
            .evaluate(QUERY, CONTEXT, OUTPUT, &EvaluationRequest::all_metrics(0.5)).await
            .unwrap();
        assert!(lenient.passed);
    }

    #[tokio::test]
    async fn test_faithfulness_at_threshold_passes() {
        let (harness, _) = harness(FixedScores::uniform(0.7));

        let score = harness
            .evaluate(QUERY, CONTEXT, OUTPUT, &EvaluationRequest::faithfulness_only(0.7)).await
            .unwrap();

        assert!(score.passed);
    }

    #[tokio::test]
    async fn test_auth_failure_keeps_its_identity() {
        let (harness, _) = harness(
            FixedScores::uniform(0.9).with(
                MetricKind::Faithfulness,
                Err(GatewayError::auth("LLM judge", "HTTP 401"))
            )
        );

        let result = harness.evaluate(QUERY, CONTEXT, OUTPUT, &EvaluationRequest::default()).await;

        assert!(matches!(result, Err(QaError::Auth(_))));
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_rejected() {
        let (harness, _) = harness(FixedScores::uniform(1.3));

        let result = harness.evaluate(QUERY, CONTEXT, OUTPUT, &EvaluationRequest::default()).await;

        assert!(matches!(result, Err(QaError::Evaluation(_))));
    }

    #[tokio::test]
    async fn test_invalid_threshold_is_rejected_before_scoring() {
        let (harness, scores) = harness(FixedScores::uniform(0.9));

        let result = harness.evaluate(
            QUERY,
            CONTEXT,
            OUTPUT,
            &EvaluationRequest::faithfulness_only(1.5)
        ).await;

        assert!(matches!(result, Err(QaError::InvalidInput(_))));
        assert!(scores.calls().is_empty());
    }
}
