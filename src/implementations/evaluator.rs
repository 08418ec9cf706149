use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use log::{ debug, info, warn };

use crate::errors::{ GatewayError, QaError, QaResult };
use crate::models::common::MetricKind;
use crate::models::evaluation::{ EvaluationRequest, EvaluationScore };
use crate::traits::evaluation_service::EvaluationService;

/// Computes every requested metric for a (query, context, output) triple.
///
/// Metrics are scored concurrently and all of them run to completion before
/// the harness answers. If any one fails the whole evaluation fails; partial
/// score sets are never returned.
#[derive(Clone)]
pub struct EvaluationHarness {
    service: Arc<dyn EvaluationService>,
}

impl EvaluationHarness {
    pub fn new(service: Arc<dyn EvaluationService>) -> Self {
        Self { service }
    }

    pub fn scorer_id(&self) -> String {
        self.service.scorer_id()
    }

    pub async fn evaluate(
        &self,
        query: &str,
        context: &str,
        output: &str,
        request: &EvaluationRequest
    ) -> QaResult<EvaluationScore> {
        if !(0.0..=1.0).contains(&request.threshold) {
            return Err(
                QaError::InvalidInput(format!("threshold {} is outside [0, 1]", request.threshold))
            );
        }

        info!(
            "Evaluating {} metric(s) with {}",
            request.metrics().len(),
            self.service.scorer_id()
        );
        let pending = request
            .metrics()
            .iter()
            .map(|metric| async move {
                (*metric, self.service.score(*metric, query, output, context).await)
            });
        let results: Vec<(MetricKind, Result<f32, GatewayError>)> = join_all(pending).await;

        let mut scores = HashMap::new();
        let mut failures = Vec::new();
        let mut auth_failure = None;
        for (metric, result) in results {
            match result {
                Ok(score) if score.is_finite() && (0.0..=1.0).contains(&score) => {
                    debug!("{} scored {:.3}", metric, score);
                    scores.insert(metric, score);
                }
                Ok(score) => failures.push(format!("{} returned {} outside [0, 1]", metric, score)),
                Err(e) => {
                    warn!("{} could not be scored: {}", metric, e);
                    failures.push(format!("{}: {}", metric, e));
                    if e.is_auth() && auth_failure.is_none() {
                        auth_failure = Some(e);
                    }
                }
            }
        }

        if let Some(e) = auth_failure {
            return Err(QaError::from_evaluation(e));
        }
        if !failures.is_empty() {
            return Err(QaError::Evaluation(failures.join("; ")));
        }

        let score = EvaluationScore::from_scores(
            &scores,
            request.threshold,
            self.service.scorer_id()
        ).ok_or_else(||
            QaError::Evaluation("faithfulness was not requested".to_string())
        )?;
        info!(
            "Evaluation {} (faithfulness {:.3}, threshold {:.2})",
            if score.passed { "passed" } else { "failed" },
            score.faithfulness,
            score.threshold
        );
        Ok(score)
    }
}
