use async_trait::async_trait;

use crate::errors::QaResult;

/// Produces a test plan for a requirement
#[async_trait]
pub trait Architect: Send + Sync {
    /// Draft a plan. `feedback` is empty on the first pass; `previous` is the
    /// plan the feedback refers to, if any.
    async fn draft_plan(
        &self,
        requirement: &str,
        feedback: &str,
        previous: Option<&str>
    ) -> QaResult<String>;
}

/// Critiques a test plan in free text
#[async_trait]
pub trait Auditor: Send + Sync {
    async fn review(&self, requirement: &str, plan: &str) -> QaResult<String>;
}
