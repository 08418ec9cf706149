use async_trait::async_trait;

use crate::errors::GatewayError;
use crate::models::common::MetricKind;

/// Scores generated output against a quality metric
#[async_trait]
pub trait EvaluationService: Send + Sync {
    /// Score in `[0, 1]` for `metric` over the given triple
    async fn score(
        &self,
        metric: MetricKind,
        query: &str,
        output: &str,
        context: &str
    ) -> Result<f32, GatewayError>;

    /// Identifier of the scorer, recorded alongside scores
    fn scorer_id(&self) -> String;
}
