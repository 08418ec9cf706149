use futures::stream::{ self, Stream, StreamExt };
use log::{ info, warn };

use crate::cancellation::CancellationToken;
use crate::config::{ EngineOptions, ReferenceContext };
use crate::errors::QaResult;
use crate::implementations::evaluator::EvaluationHarness;
use crate::implementations::pipeline::PipelineCoordinator;
use crate::models::common::Category;
use crate::models::evaluation::{ BatchResult, BatchScenario, EvaluationRequest };

/// The regression scenarios the tool ships with
pub fn default_scenarios() -> Vec<BatchScenario> {
    vec![
        BatchScenario::new("How should I test SHA-256 encryption?", Category::Security),
        BatchScenario::new("What is the requirement for API response timeout?", Category::Technical),
        BatchScenario::new("How do we handle MFA login verification?", Category::Security)
    ]
}

/// Drives scenarios through the pipeline and scores faithfulness
#[derive(Clone)]
pub struct BatchRunner {
    pipeline: PipelineCoordinator,
    harness: EvaluationHarness,
    options: EngineOptions,
}

impl BatchRunner {
    pub fn new(pipeline: PipelineCoordinator, harness: EvaluationHarness, options: EngineOptions) -> Self {
        Self { pipeline, harness, options }
    }

    /// Lazily evaluate `scenarios`, yielding results in input order.
    ///
    /// Up to `batch_concurrency` scenarios are in flight at once. Each call
    /// builds a fresh stream starting from the first scenario.
    pub fn stream<'a>(
        &'a self,
        scenarios: &'a [BatchScenario],
        cancel: &'a CancellationToken
    ) -> impl Stream<Item = BatchResult> + 'a {
        stream
            ::iter(scenarios.iter().enumerate())
            .map(move |(index, scenario)| self.run_scenario(index, scenario, cancel))
            .buffered(self.options.batch_concurrency.max(1))
    }

    pub async fn run_batch(
        &self,
        scenarios: &[BatchScenario],
        cancel: &CancellationToken
    ) -> Vec<BatchResult> {
        info!("Starting batch of {} scenario(s)", scenarios.len());
        self.stream(scenarios, cancel).collect().await
    }

    /// Never fails: an error becomes a failed result for this scenario only
    async fn run_scenario(
        &self,
        index: usize,
        scenario: &BatchScenario,
        cancel: &CancellationToken
    ) -> BatchResult {
        info!("Running scenario {}: {}", index + 1, scenario.input);
        match self.try_scenario(scenario, cancel).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Scenario {} failed: {}", index + 1, e);
                BatchResult::failed(&scenario.input, e.to_string())
            }
        }
    }

    async fn try_scenario(
        &self,
        scenario: &BatchScenario,
        cancel: &CancellationToken
    ) -> QaResult<BatchResult> {
        let output = self.pipeline.run(&scenario.input, cancel).await?;

        let context = match &self.options.reference_context {
            ReferenceContext::Fixed(text) => text.as_str(),
            ReferenceContext::Retrieved => output.document.text.as_str(),
        };

        cancel.check("evaluation")?;
        let request = EvaluationRequest::faithfulness_only(self.options.threshold);
        let score = self.harness
            .evaluate(&scenario.input, context, output.artifact.as_str(), &request).await?;

        let category_matched = output.category == scenario.expected_category;
        if !category_matched {
            warn!(
                "Scenario routed to '{}' but expected '{}'",
                output.category,
                scenario.expected_category
            );
        }

        Ok(BatchResult {
            input: scenario.input.clone(),
            score: Some(score.faithfulness),
            passed: score.passed,
            category: Some(output.category),
            category_matched: Some(category_matched),
            error: None,
        })
    }
}
