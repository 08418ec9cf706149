use std::fmt;
use std::str::FromStr;

use serde::{ Deserialize, Serialize };

/// Topical rule sets a query can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Security,
    Technical,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Security, Category::Technical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Security => "security",
            Category::Technical => "technical",
        }
    }

    /// What the router should file under this category
    pub fn description(&self) -> &'static str {
        match self {
            Category::Security => "if it relates to MFA, encryption, or access",
            Category::Technical => "if it relates to API performance, status codes, or formatting",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Exact match against the lowercase label; callers normalize first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| s.to_string())
    }
}

/// Quality metrics the evaluation service can score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Faithfulness,
    AnswerRelevance,
    ContextualRelevance,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [
        MetricKind::Faithfulness,
        MetricKind::AnswerRelevance,
        MetricKind::ContextualRelevance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Faithfulness => "faithfulness",
            MetricKind::AnswerRelevance => "answer_relevance",
            MetricKind::ContextualRelevance => "contextual_relevance",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Auditor verdict threaded through the review loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Pending,
    Approved,
    Revise,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Pending => write!(f, "pending"),
            Decision::Approved => write!(f, "approved"),
            Decision::Revise => write!(f, "revise"),
        }
    }
}
