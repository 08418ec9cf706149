use serde::Serialize;

use crate::models::common::Decision;

/// Phases of the architect/auditor loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefinementPhase {
    Drafting,
    Reviewing,
    Revising,
    Approved,
    Exhausted,
}

impl RefinementPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RefinementPhase::Approved | RefinementPhase::Exhausted)
    }
}

/// Mutable record owned by exactly one refinement run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewState {
    pub requirement: String,
    pub artifact: String,
    pub feedback: String,
    pub revision_count: u32,
    pub decision: Decision,
}

impl ReviewState {
    pub fn new(requirement: impl Into<String>) -> Self {
        Self {
            requirement: requirement.into(),
            artifact: String::new(),
            feedback: String::new(),
            revision_count: 0,
            decision: Decision::Pending,
        }
    }
}

/// One architect draft and the auditor's answer to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRound {
    pub revision: u32,
    pub artifact: String,
    pub auditor_response: String,
    pub decision: Decision,
}

/// Terminal outcome of a refinement run
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResult {
    pub state: ReviewState,
    pub rounds: Vec<ReviewRound>,
}

impl ReviewResult {
    pub fn is_approved(&self) -> bool {
        self.state.decision == Decision::Approved
    }

    pub fn revision_count(&self) -> u32 {
        self.state.revision_count
    }

    pub fn artifact(&self) -> &str {
        &self.state.artifact
    }

    /// Auditor responses in the order they were given
    pub fn feedback_trail(&self) -> Vec<&str> {
        self.rounds
            .iter()
            .map(|r| r.auditor_response.as_str())
            .collect()
    }
}
