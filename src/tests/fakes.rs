//! In-memory gateway doubles used across the test modules.

use std::collections::{ HashMap, VecDeque };
use std::sync::{ Arc, Mutex };

use async_trait::async_trait;

use crate::errors::GatewayError;
use crate::implementations::config::QaConfig;
use crate::implementations::lexical_index::LexicalIndex;
use crate::implementations::orchestrator::Gateways;
use crate::models::common::MetricKind;
use crate::traits::evaluation_service::EvaluationService;
use crate::traits::inference_gateway::InferenceGateway;

// Needles that identify which default template produced a prompt
pub const ROUTER: &str = "Return ONLY the category name";
pub const DRAFTER: &str = "You are a QA Specialist";
pub const ARCHITECT: &str = "Create a detailed QA test plan";
pub const ARCHITECT_REVISION: &str = "Revise the following QA test plan";
pub const AUDITOR: &str = "Act as a Senior QA Auditor";

type Reply = Result<String, GatewayError>;

struct Route {
    needle: String,
    replies: Mutex<VecDeque<Reply>>,
}

/// Inference double answering by substring match on the prompt.
///
/// Routes are tried in insertion order. Each route pops its replies in
/// sequence and keeps repeating the last one.
#[derive(Default)]
pub struct ScriptedInference {
    routes: Vec<Route>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedInference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, needle: &str, replies: Vec<Reply>) -> Self {
        assert!(!replies.is_empty(), "route needs at least one reply");
        self.routes.push(Route {
            needle: needle.to_string(),
            replies: Mutex::new(replies.into_iter().collect()),
        });
        self
    }

    pub fn reply(self, needle: &str, text: &str) -> Self {
        self.on(needle, vec![Ok(text.to_string())])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Prompts containing `needle`
    pub fn prompts_matching(&self, needle: &str) -> Vec<String> {
        self.prompts()
            .into_iter()
            .filter(|p| p.contains(needle))
            .collect()
    }
}

#[async_trait]
impl InferenceGateway for ScriptedInference {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        for route in &self.routes {
            if prompt.contains(&route.needle) {
                let mut replies = route.replies.lock().unwrap();
                return if replies.len() > 1 {
                    replies.pop_front().unwrap()
                } else {
                    replies.front().cloned().unwrap()
                };
            }
        }
        Err(GatewayError::failed("scripted", format!("no scripted reply for prompt: {}", prompt)))
    }

    fn model_id(&self) -> String {
        "scripted-model".to_string()
    }
}

/// Evaluation double with a fixed answer per metric
pub struct FixedScores {
    scores: HashMap<MetricKind, Result<f32, GatewayError>>,
    calls: Mutex<Vec<MetricKind>>,
    contexts: Mutex<Vec<String>>,
}

impl FixedScores {
    pub fn uniform(score: f32) -> Self {
        Self {
            scores: MetricKind::ALL.iter().map(|m| (*m, Ok(score))).collect(),
            calls: Mutex::new(Vec::new()),
            contexts: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, metric: MetricKind, score: Result<f32, GatewayError>) -> Self {
        self.scores.insert(metric, score);
        self
    }

    pub fn calls(&self) -> Vec<MetricKind> {
        self.calls.lock().unwrap().clone()
    }

    /// Retrieval contexts passed in, one per scored metric
    pub fn contexts(&self) -> Vec<String> {
        self.contexts.lock().unwrap().clone()
    }
}

#[async_trait]
impl EvaluationService for FixedScores {
    async fn score(
        &self,
        metric: MetricKind,
        _query: &str,
        _output: &str,
        context: &str
    ) -> Result<f32, GatewayError> {
        self.calls.lock().unwrap().push(metric);
        self.contexts.lock().unwrap().push(context.to_string());
        // Yield so concurrently scored metrics interleave
        tokio::task::yield_now().await;
        self.scores
            .get(&metric)
            .cloned()
            .unwrap_or_else(|| Err(GatewayError::failed("fixed", "metric not configured")))
    }

    fn scorer_id(&self) -> String {
        "fixed-scores".to_string()
    }
}

pub fn gateways(
    inference: Arc<ScriptedInference>,
    retrieval: LexicalIndex,
    evaluation: Arc<FixedScores>
) -> Gateways {
    Gateways {
        inference,
        retrieval: Arc::new(retrieval),
        evaluation,
    }
}

pub fn test_config() -> QaConfig {
    QaConfig::default()
}
