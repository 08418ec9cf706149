use std::sync::Arc;

use log::{ debug, info, warn };

use crate::errors::{ QaError, QaResult };
use crate::implementations::config::{ render_template, ConfigError, QaConfig, ROUTER_TEMPLATE };
use crate::models::common::Category;
use crate::traits::inference_gateway::InferenceGateway;

/// Routes a free-text query to one of the fixed categories
#[derive(Clone)]
pub struct Classifier {
    gateway: Arc<dyn InferenceGateway>,
    template: String,
}

impl Classifier {
    pub fn new(gateway: Arc<dyn InferenceGateway>, config: &QaConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            gateway,
            template: config.get_template(ROUTER_TEMPLATE)?.to_string(),
        })
    }

    /// Ask the model for a label and validate it against `Category`.
    /// An unrecognized label is an error, never a fallback category.
    pub async fn classify(&self, query: &str) -> QaResult<Category> {
        let categories = Category::ALL.iter()
            .enumerate()
            .map(|(i, c)| format!("{}. '{}' ({})", i + 1, c, c.description()))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = render_template(&self.template, &[
            ("categories", categories.as_str()),
            ("query", query),
        ]);

        info!("Routing query: '{}'", query);
        let raw = self.gateway
            .complete(&prompt).await
            .map_err(|e| QaError::from_generation("classification", e))?;
        debug!("Router answered: {:?}", raw);

        let label = normalize_label(&raw);
        match label.parse::<Category>() {
            Ok(category) => {
                info!("Route selected: {}", category);
                Ok(category)
            }
            Err(label) => {
                warn!("Router returned unrecognized label {:?}", label);
                Err(QaError::Classification { label })
            }
        }
    }
}

/// Trim and lowercase, also dropping quotes/backticks/trailing periods models wrap labels in
pub fn normalize_label(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '\'' | '"' | '`' | '.'))
        .to_lowercase()
}
