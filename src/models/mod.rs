pub mod common;
pub mod document;
pub mod artifact;
pub mod trace;
pub mod review;
pub mod evaluation;

// Re-export common model types
pub use common::{ Category, Decision, MetricKind };
pub use document::{ GroundingDocument, SearchFilter, SearchHit };
pub use artifact::{ Artifact, PipelineResult };
pub use trace::{ TraceEvent, TraceRecord };
pub use review::{ RefinementPhase, ReviewResult, ReviewRound, ReviewState };
pub use evaluation::{
    BatchResult,
    BatchScenario,
    BatchSummary,
    EvaluationRequest,
    EvaluationScore,
    DEFAULT_THRESHOLD,
};
