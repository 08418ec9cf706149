use std::collections::HashMap;

use serde::{ Deserialize, Serialize };

use crate::models::common::{ Category, MetricKind };

pub const DEFAULT_THRESHOLD: f32 = 0.7;

/// Which metrics to compute and the bar each must clear.
/// Faithfulness is always scored.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRequest {
    metrics: Vec<MetricKind>,
    pub threshold: f32,
}

impl EvaluationRequest {
    pub fn faithfulness_only(threshold: f32) -> Self {
        Self {
            metrics: vec![MetricKind::Faithfulness],
            threshold,
        }
    }

    pub fn all_metrics(threshold: f32) -> Self {
        Self {
            metrics: MetricKind::ALL.to_vec(),
            threshold,
        }
    }

    pub fn with_metric(mut self, metric: MetricKind) -> Self {
        if !self.metrics.contains(&metric) {
            self.metrics.push(metric);
        }
        self
    }

    pub fn metrics(&self) -> &[MetricKind] {
        &self.metrics
    }
}

impl Default for EvaluationRequest {
    fn default() -> Self {
        Self::faithfulness_only(DEFAULT_THRESHOLD)
    }
}

/// Scores for one (query, context, output) triple
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationScore {
    pub faithfulness: f32,
    pub answer_relevance: Option<f32>,
    pub contextual_relevance: Option<f32>,
    pub threshold: f32,
    pub passed: bool,
    /// Which evaluation service produced the scores
    pub scorer: String,
}

impl EvaluationScore {
    /// Build from a complete set of scores; `passed` holds iff every scored metric clears `threshold`.
    pub(crate) fn from_scores(
        scores: &HashMap<MetricKind, f32>,
        threshold: f32,
        scorer: String
    ) -> Option<Self> {
        let faithfulness = *scores.get(&MetricKind::Faithfulness)?;
        let passed = scores.values().all(|s| *s >= threshold);
        Some(Self {
            faithfulness,
            answer_relevance: scores.get(&MetricKind::AnswerRelevance).copied(),
            contextual_relevance: scores.get(&MetricKind::ContextualRelevance).copied(),
            threshold,
            passed,
            scorer,
        })
    }

    pub fn score(&self, metric: MetricKind) -> Option<f32> {
        match metric {
            MetricKind::Faithfulness => Some(self.faithfulness),
            MetricKind::AnswerRelevance => self.answer_relevance,
            MetricKind::ContextualRelevance => self.contextual_relevance,
        }
    }

    /// Per-metric verdict; `None` when the metric was not requested
    pub fn metric_passed(&self, metric: MetricKind) -> Option<bool> {
        self.score(metric).map(|s| s >= self.threshold)
    }
}

/// One regression scenario for the batch runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchScenario {
    pub input: String,
    pub expected_category: Category,
}

impl BatchScenario {
    pub fn new(input: impl Into<String>, expected_category: Category) -> Self {
        Self {
            input: input.into(),
            expected_category,
        }
    }
}

/// Outcome of one scenario in a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub input: String,
    pub score: Option<f32>,
    pub passed: bool,
    pub category: Option<Category>,
    pub category_matched: Option<bool>,
    pub error: Option<String>,
}

impl BatchResult {
    pub fn failed(input: &str, error: String) -> Self {
        Self {
            input: input.to_string(),
            score: None,
            passed: false,
            category: None,
            category_matched: None,
            error: Some(error),
        }
    }
}

/// Aggregate counts over a finished batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub mean_score: Option<f32>,
}

impl BatchSummary {
    pub fn from_results(results: &[BatchResult]) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        let scores: Vec<f32> = results.iter().filter_map(|r| r.score).collect();
        let mean_score = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f32>() / (scores.len() as f32))
        };

        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            mean_score,
        }
    }
}
