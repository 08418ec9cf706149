use std::sync::Arc;

use async_trait::async_trait;

use crate::cancellation::CancellationToken;
use crate::config::EngineOptions;
use crate::errors::{ QaError, QaResult };
use crate::implementations::batch::BatchRunner;
use crate::implementations::classifier::Classifier;
use crate::implementations::config::QaConfig;
use crate::implementations::drafter::Drafter;
use crate::implementations::evaluator::EvaluationHarness;
use crate::implementations::pipeline::PipelineCoordinator;
use crate::implementations::refinement::RefinementMachine;
use crate::implementations::retriever::Retriever;
use crate::implementations::review_agents::{ LlmArchitect, LlmAuditor };
use crate::models::artifact::PipelineResult;
use crate::models::evaluation::{ BatchResult, BatchScenario, EvaluationRequest, EvaluationScore };
use crate::models::review::ReviewResult;
use crate::traits::evaluation_service::EvaluationService;
use crate::traits::inference_gateway::InferenceGateway;
use crate::traits::qa_system::QaSystem;
use crate::traits::retrieval_gateway::RetrievalGateway;

/// External services the engine talks to
#[derive(Clone)]
pub struct Gateways {
    pub inference: Arc<dyn InferenceGateway>,
    pub retrieval: Arc<dyn RetrievalGateway>,
    pub evaluation: Arc<dyn EvaluationService>,
}

/// Wires the components together behind [`QaSystem`]
#[derive(Clone)]
pub struct Orchestrator {
    pipeline: PipelineCoordinator,
    refinement: RefinementMachine,
    harness: EvaluationHarness,
    batch: BatchRunner,
    options: EngineOptions,
}

impl Orchestrator {
    pub fn new(config: &QaConfig, gateways: Gateways) -> QaResult<Self> {
        config.validate()?;
        let options = config.engine_options();
        let model = gateways.inference.model_id();

        let pipeline = PipelineCoordinator::new(
            Classifier::new(gateways.inference.clone(), config)?,
            Retriever::new(gateways.retrieval.clone()),
            Drafter::new(gateways.inference.clone(), config)?,
            model
        );
        let refinement = RefinementMachine::new(
            Arc::new(LlmArchitect::new(gateways.inference.clone(), config)?),
            Arc::new(LlmAuditor::new(gateways.inference.clone(), config)?)
        );
        let harness = EvaluationHarness::new(gateways.evaluation.clone());
        let batch = BatchRunner::new(pipeline.clone(), harness.clone(), options.clone());

        Ok(Self {
            pipeline,
            refinement,
            harness,
            batch,
            options,
        })
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn batch_runner(&self) -> &BatchRunner {
        &self.batch
    }

    pub fn scorer_id(&self) -> String {
        self.harness.scorer_id()
    }
}

fn require_text(field: &str, value: &str) -> QaResult<()> {
    if value.trim().is_empty() {
        return Err(QaError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

#[async_trait]
impl QaSystem for Orchestrator {
    async fn run_pipeline(
        &self,
        query: &str,
        cancel: &CancellationToken
    ) -> QaResult<PipelineResult> {
        require_text("query", query)?;
        self.pipeline.run(query, cancel).await
    }

    async fn run_refinement(
        &self,
        requirement: &str,
        cancel: &CancellationToken
    ) -> QaResult<ReviewResult> {
        require_text("requirement", requirement)?;
        self.refinement.run(requirement, cancel).await
    }

    async fn evaluate(
        &self,
        query: &str,
        context: &str,
        output: &str,
        request: &EvaluationRequest
    ) -> QaResult<EvaluationScore> {
        require_text("query", query)?;
        require_text("output", output)?;
        self.harness.evaluate(query, context, output, request).await
    }

    async fn run_batch(
        &self,
        scenarios: &[BatchScenario],
        cancel: &CancellationToken
    ) -> Vec<BatchResult> {
        self.batch.run_batch(scenarios, cancel).await
    }
}
