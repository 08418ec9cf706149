use std::sync::Arc;

use log::{ info, warn };

use crate::cancellation::CancellationToken;
use crate::errors::QaResult;
use crate::models::common::Decision;
use crate::models::review::{ RefinementPhase, ReviewResult, ReviewRound, ReviewState };
use crate::traits::review_roles::{ Architect, Auditor };

/// Architect drafts allowed per run before the loop gives up
pub const REVISION_CEILING: u32 = 3;

/// Marker the auditor uses to accept a plan
pub const APPROVAL_MARKER: &str = "APPROVED";

/// Case-insensitive substring match on the approval marker
pub fn is_approved(auditor_response: &str) -> bool {
    auditor_response.to_uppercase().contains(APPROVAL_MARKER)
}

/// Termination gate evaluated after every review
pub fn next_phase(state: &ReviewState) -> RefinementPhase {
    if state.decision == Decision::Approved {
        RefinementPhase::Approved
    } else if state.revision_count >= REVISION_CEILING {
        RefinementPhase::Exhausted
    } else {
        RefinementPhase::Revising
    }
}

/// Bounded architect/auditor loop.
///
/// Each call to [`RefinementMachine::run`] owns its own `ReviewState`, so one
/// machine can serve concurrent runs.
#[derive(Clone)]
pub struct RefinementMachine {
    architect: Arc<dyn Architect>,
    auditor: Arc<dyn Auditor>,
}

impl RefinementMachine {
    pub fn new(architect: Arc<dyn Architect>, auditor: Arc<dyn Auditor>) -> Self {
        Self { architect, auditor }
    }

    pub async fn run(&self, requirement: &str, cancel: &CancellationToken) -> QaResult<ReviewResult> {
        let mut state = ReviewState::new(requirement);
        let mut rounds = Vec::new();
        let mut phase = RefinementPhase::Drafting;

        while !phase.is_terminal() {
            phase = match phase {
                RefinementPhase::Drafting => {
                    cancel.check("architect")?;
                    let previous = if state.artifact.is_empty() {
                        None
                    } else {
                        Some(state.artifact.as_str())
                    };
                    let plan = self.architect
                        .draft_plan(&state.requirement, &state.feedback, previous).await?;
                    state.artifact = plan;
                    state.revision_count += 1;
                    info!("Architect produced revision {}", state.revision_count);
                    RefinementPhase::Reviewing
                }
                RefinementPhase::Reviewing => {
                    cancel.check("auditor")?;
                    let response = self.auditor.review(&state.requirement, &state.artifact).await?;
                    state.decision = if is_approved(&response) {
                        Decision::Approved
                    } else {
                        Decision::Revise
                    };
                    info!("Auditor decision on revision {}: {}", state.revision_count, state.decision);
                    rounds.push(ReviewRound {
                        revision: state.revision_count,
                        artifact: state.artifact.clone(),
                        auditor_response: response.clone(),
                        decision: state.decision,
                    });
                    state.feedback = response;
                    next_phase(&state)
                }
                RefinementPhase::Revising => RefinementPhase::Drafting,
                terminal => terminal,
            };
        }

        if phase == RefinementPhase::Exhausted {
            warn!(
                "Revision ceiling of {} reached without approval; returning unapproved plan",
                REVISION_CEILING
            );
        }

        Ok(ReviewResult { state, rounds })
    }
}
