use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use crate::errors::GatewayError;
use crate::implementations::config::{ render_template, ConfigError, QaConfig, JUDGE_TEMPLATE };
use crate::models::common::MetricKind;
use crate::traits::evaluation_service::EvaluationService;
use crate::traits::inference_gateway::InferenceGateway;

const SERVICE: &str = "LLM judge";

#[derive(Debug, Deserialize)]
struct JudgeVerdict {
    score: f32,
    #[serde(default)]
    reason: String,
}

/// Evaluation service that asks a language model to grade each metric
#[derive(Clone)]
pub struct LlmJudge {
    gateway: Arc<dyn InferenceGateway>,
    template: String,
}

impl LlmJudge {
    pub fn new(gateway: Arc<dyn InferenceGateway>, config: &QaConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            gateway,
            template: config.get_template(JUDGE_TEMPLATE)?.to_string(),
        })
    }

    fn rubric(metric: MetricKind) -> &'static str {
        match metric {
            MetricKind::Faithfulness =>
                "Fraction of claims in the generated output that are supported by the retrieval context. Claims that contradict the context score 0.",
            MetricKind::AnswerRelevance =>
                "Fraction of statements in the generated output that directly address the input query.",
            MetricKind::ContextualRelevance =>
                "Fraction of the retrieval context that is relevant to answering the input query.",
        }
    }
}

#[async_trait]
impl EvaluationService for LlmJudge {
    async fn score(
        &self,
        metric: MetricKind,
        query: &str,
        output: &str,
        context: &str
    ) -> Result<f32, GatewayError> {
        let prompt = render_template(
            &self.template,
            &[
                ("metric", metric.as_str()),
                ("rubric", Self::rubric(metric)),
                ("query", query),
                ("context", context),
                ("output", output),
            ]
        );

        let response = self.gateway.complete(&prompt).await?;
        let verdict = parse_verdict(&response)?;
        debug!("{} = {:.3} ({})", metric, verdict.score, verdict.reason);
        Ok(verdict.score)
    }

    fn scorer_id(&self) -> String {
        format!("llm-judge:{}", self.gateway.model_id())
    }
}

/// Pull the first JSON object out of a possibly chatty response
fn parse_verdict(response: &str) -> Result<JudgeVerdict, GatewayError> {
    let start = response.find('{');
    let end = response.rfind('}');
    let json = match (start, end) {
        (Some(s), Some(e)) if s < e => &response[s..=e],
        _ => {
            return Err(GatewayError::failed(SERVICE, "verdict contains no JSON object"));
        }
    };

    let verdict: JudgeVerdict = serde_json
        ::from_str(json)
        .map_err(|e| GatewayError::failed(SERVICE, format!("unparseable verdict: {}", e)))?;

    if !verdict.score.is_finite() || !(0.0..=1.0).contains(&verdict.score) {
        return Err(GatewayError::failed(SERVICE, format!("score {} outside [0, 1]", verdict.score)));
    }
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verdict_tolerates_code_fences() {
        let verdict = parse_verdict("```json\n{\"score\": 0.85, \"reason\": \"ok\"}\n```").unwrap();
        assert!((verdict.score - 0.85).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_verdict_rejects_out_of_range_and_garbage() {
        assert!(parse_verdict("{\"score\": 1.4}").is_err());
        assert!(parse_verdict("{\"score\": -0.1}").is_err());
        assert!(parse_verdict("about 0.9 I think").is_err());
    }
}
