use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::errors::{ QaError, QaResult };
use crate::implementations::config::{
    render_template,
    ConfigError,
    QaConfig,
    ARCHITECT_REVISION_TEMPLATE,
    ARCHITECT_TEMPLATE,
    AUDITOR_TEMPLATE,
};
use crate::traits::inference_gateway::InferenceGateway;
use crate::traits::review_roles::{ Architect, Auditor };

/// Architect role backed by an inference gateway
#[derive(Clone)]
pub struct LlmArchitect {
    gateway: Arc<dyn InferenceGateway>,
    draft_template: String,
    revision_template: String,
}

impl LlmArchitect {
    pub fn new(gateway: Arc<dyn InferenceGateway>, config: &QaConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            gateway,
            draft_template: config.get_template(ARCHITECT_TEMPLATE)?.to_string(),
            revision_template: config.get_template(ARCHITECT_REVISION_TEMPLATE)?.to_string(),
        })
    }
}

#[async_trait]
impl Architect for LlmArchitect {
    async fn draft_plan(
        &self,
        requirement: &str,
        feedback: &str,
        previous: Option<&str>
    ) -> QaResult<String> {
        // Feedback always reaches the architect, even when the last draft came back empty
        let prompt = if feedback.is_empty() {
            info!("Architect: drafting the test plan");
            render_template(&self.draft_template, &[("requirement", requirement)])
        } else {
            info!("Architect: revising the test plan");
            render_template(&self.revision_template, &[
                ("requirement", requirement),
                ("previous", previous.unwrap_or("(no plan was produced)")),
                ("feedback", feedback),
            ])
        };

        self.gateway.complete(&prompt).await.map_err(|e| QaError::from_generation("architect", e))
    }
}

/// Auditor role backed by an inference gateway
#[derive(Clone)]
pub struct LlmAuditor {
    gateway: Arc<dyn InferenceGateway>,
    template: String,
}

impl LlmAuditor {
    pub fn new(gateway: Arc<dyn InferenceGateway>, config: &QaConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            gateway,
            template: config.get_template(AUDITOR_TEMPLATE)?.to_string(),
        })
    }
}

#[async_trait]
impl Auditor for LlmAuditor {
    async fn review(&self, requirement: &str, plan: &str) -> QaResult<String> {
        info!("Auditor: reviewing the plan for gaps");
        let prompt = render_template(&self.template, &[
            ("requirement", requirement),
            ("plan", plan),
        ]);

        self.gateway.complete(&prompt).await.map_err(|e| QaError::from_generation("auditor", e))
    }
}
