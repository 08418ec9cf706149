use async_trait::async_trait;

use crate::cancellation::CancellationToken;
use crate::errors::QaResult;
use crate::models::artifact::PipelineResult;
use crate::models::evaluation::{ BatchResult, BatchScenario, EvaluationRequest, EvaluationScore };
use crate::models::review::ReviewResult;

/// Main facade consumed by presentation layers
#[async_trait]
pub trait QaSystem: Send + Sync {
    /// Route, retrieve and draft a test case for `query`
    async fn run_pipeline(
        &self,
        query: &str,
        cancel: &CancellationToken
    ) -> QaResult<PipelineResult>;

    /// Run the architect/auditor loop for `requirement`
    async fn run_refinement(
        &self,
        requirement: &str,
        cancel: &CancellationToken
    ) -> QaResult<ReviewResult>;

    /// Score a completed artifact
    async fn evaluate(
        &self,
        query: &str,
        context: &str,
        output: &str,
        request: &EvaluationRequest
    ) -> QaResult<EvaluationScore>;

    /// Drive `scenarios` through the pipeline and faithfulness scoring
    async fn run_batch(
        &self,
        scenarios: &[BatchScenario],
        cancel: &CancellationToken
    ) -> Vec<BatchResult>;
}
