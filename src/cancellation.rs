//! Cooperative cancellation for pipeline, refinement and batch runs.

use std::sync::atomic::{ AtomicBool, Ordering };
use std::sync::Arc;

use crate::errors::{ QaError, QaResult };

/// Shared flag checked before every gateway call.
///
/// Clones observe the same flag, so a caller can hand one clone to a run and
/// cancel it from elsewhere.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with `Cancelled` if the flag is set; `stage` names the call about to be issued
    pub fn check(&self, stage: &str) -> QaResult<()> {
        if self.is_cancelled() {
            log::info!("Run cancelled before {}", stage);
            return Err(QaError::Cancelled { stage: stage.to_string() });
        }
        Ok(())
    }
}
