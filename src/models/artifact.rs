use serde::Serialize;

use crate::models::common::Category;
use crate::models::document::GroundingDocument;
use crate::models::trace::TraceRecord;

/// Generated test case or test plan text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Artifact(String);

impl Artifact {
    pub fn new(text: impl Into<String>) -> Self {
        Artifact(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output of the single-pass route -> retrieve -> draft pipeline
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub category: Category,
    pub document: GroundingDocument,
    pub artifact: Artifact,
    pub trace: TraceRecord,
}
