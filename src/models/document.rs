use std::collections::HashMap;

use serde::{ Deserialize, Serialize };

use crate::models::common::Category;

/// Retrieved reference text a generation step must stay faithful to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingDocument {
    pub text: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl GroundingDocument {
    /// Where the rule came from, if the corpus recorded it
    pub fn source(&self) -> &str {
        self.metadata
            .get("source")
            .map(String::as_str)
            .unwrap_or("Unknown")
    }
}

/// A single hit returned by the retrieval gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub text: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl From<SearchHit> for GroundingDocument {
    fn from(hit: SearchHit) -> Self {
        GroundingDocument {
            text: hit.text,
            metadata: hit.metadata,
        }
    }
}

/// Metadata filter applied to similarity search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub category: String,
}

impl From<Category> for SearchFilter {
    fn from(category: Category) -> Self {
        SearchFilter {
            category: category.as_str().to_string(),
        }
    }
}
