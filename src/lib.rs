pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod cancellation;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use cancellation::CancellationToken;
pub use config::{ EngineOptions, ReferenceContext, DEFAULT_REFERENCE_CONTEXT };
pub use errors::{ ErrorContext, ErrorSeverity, GatewayError, QaError, QaResult, RecoverableError };
pub use implementations::{
    batch::{ default_scenarios, BatchRunner },
    classifier::Classifier,
    config::QaConfig,
    drafter::Drafter,
    evaluator::EvaluationHarness,
    lexical_index::LexicalIndex,
    llm_client::LlmClient,
    llm_judge::LlmJudge,
    orchestrator::{ Gateways, Orchestrator },
    pipeline::PipelineCoordinator,
    refinement::{ is_approved, RefinementMachine, REVISION_CEILING },
    retriever::Retriever,
    review_agents::{ LlmArchitect, LlmAuditor },
};
pub use models::{
    Artifact,
    BatchResult,
    BatchScenario,
    BatchSummary,
    Category,
    Decision,
    EvaluationRequest,
    EvaluationScore,
    GroundingDocument,
    MetricKind,
    PipelineResult,
    ReviewResult,
    ReviewState,
    TraceRecord,
};
pub use traits::{ Architect, Auditor, EvaluationService, InferenceGateway, QaSystem, RetrievalGateway };
