use std::sync::Arc;

use log::info;

use crate::errors::{ QaError, QaResult };
use crate::implementations::config::{ render_template, ConfigError, QaConfig, DRAFTER_TEMPLATE };
use crate::models::artifact::Artifact;
use crate::models::document::GroundingDocument;
use crate::traits::inference_gateway::InferenceGateway;

/// Writes a test case constrained to one grounding document
#[derive(Clone)]
pub struct Drafter {
    gateway: Arc<dyn InferenceGateway>,
    template: String,
}

impl Drafter {
    pub fn new(gateway: Arc<dyn InferenceGateway>, config: &QaConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            gateway,
            template: config.get_template(DRAFTER_TEMPLATE)?.to_string(),
        })
    }

    /// One generation call, no retries
    pub async fn draft(&self, query: &str, doc: &GroundingDocument) -> QaResult<Artifact> {
        let prompt = render_template(&self.template, &[
            ("source", doc.source()),
            ("context", doc.text.as_str()),
            ("query", query),
        ]);

        let text = self.gateway
            .complete(&prompt).await
            .map_err(|e| QaError::from_generation("drafting", e))?;
        info!("Drafted test case of {} characters", text.len());
        Ok(Artifact::new(text))
    }
}
