use serde::{ Deserialize, Serialize };

use crate::models::evaluation::DEFAULT_THRESHOLD;

/// Fixed reference string the batch runner scores faithfulness against
pub const DEFAULT_REFERENCE_CONTEXT: &str =
    "Standard: Use SHA-256 for encryption and 200ms for API timeouts.";

/// What the batch runner passes to the evaluator as retrieval context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "text", rename_all = "snake_case")]
pub enum ReferenceContext {
    /// Score every scenario against the same reference text
    Fixed(String),
    /// Score against the document the pipeline actually retrieved
    Retrieved,
}

impl Default for ReferenceContext {
    fn default() -> Self {
        ReferenceContext::Fixed(DEFAULT_REFERENCE_CONTEXT.to_string())
    }
}

/// Options for the orchestration engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Pass bar for every metric
    pub threshold: f32,
    /// Scenarios evaluated at once by the batch runner
    pub batch_concurrency: usize,
    pub reference_context: ReferenceContext,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            batch_concurrency: 4,
            reference_context: ReferenceContext::default(),
        }
    }
}
