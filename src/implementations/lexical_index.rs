use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use log::{ debug, info };
use serde::Deserialize;

use crate::errors::GatewayError;
use crate::implementations::config::ConfigError;
use crate::models::document::{ SearchFilter, SearchHit };
use crate::traits::retrieval_gateway::RetrievalGateway;

#[derive(Debug, Clone, Deserialize)]
struct CorpusEntry {
    text: String,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct IndexedDocument {
    text: String,
    metadata: HashMap<String, String>,
    terms: HashMap<String, f32>,
    norm: f32,
}

/// In-process retrieval gateway ranking documents by bag-of-words cosine similarity.
///
/// Documents carry string metadata; the `category` key is what search filters on.
#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    documents: Vec<IndexedDocument>,
}

impl LexicalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference rules shipped with the tool
    pub fn seeded() -> Self {
        let mut index = Self::new();
        index.add(
            "Rule: All admin accounts must use Multi-Factor Authentication (MFA).",
            &[("category", "security"), ("priority", "high")]
        );
        index.add(
            "Rule: API response time for login must be under 200ms.",
            &[("category", "technical"), ("priority", "medium")]
        );
        index.add(
            "Rule: Passwords must be encrypted using SHA-256.",
            &[("category", "security"), ("priority", "high")]
        );
        index
    }

    /// Load a YAML list of `{text, metadata}` entries
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let entries: Vec<CorpusEntry> = serde_yaml::from_str(&contents)?;
        let mut index = Self::new();
        for entry in entries {
            index.insert(entry.text, entry.metadata);
        }
        info!("Loaded {} reference documents from {}", index.len(), path.display());
        Ok(index)
    }

    pub fn add(&mut self, text: &str, metadata: &[(&str, &str)]) {
        let metadata = metadata
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.insert(text.to_string(), metadata);
    }

    fn insert(&mut self, text: String, metadata: HashMap<String, String>) {
        let terms = term_frequencies(&text);
        let norm = vector_norm(&terms);
        self.documents.push(IndexedDocument { text, metadata, terms, norm });
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl RetrievalGateway for LexicalIndex {
    async fn search(
        &self,
        query: &str,
        filter: &SearchFilter,
        top_k: usize
    ) -> Result<Vec<SearchHit>, GatewayError> {
        let query_terms = term_frequencies(query);
        let query_norm = vector_norm(&query_terms);

        let mut ranked: Vec<(usize, f32)> = self.documents
            .iter()
            .enumerate()
            .filter(|(_, doc)| doc.metadata.get("category") == Some(&filter.category))
            .map(|(position, doc)| (position, cosine(&query_terms, query_norm, doc)))
            .collect();

        // Stable sort keeps insertion order among equal scores
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        debug!(
            "Lexical search in '{}' matched {} candidate(s)",
            filter.category,
            ranked.len()
        );

        Ok(
            ranked
                .into_iter()
                .take(top_k)
                .map(|(position, _)| {
                    let doc = &self.documents[position];
                    SearchHit {
                        text: doc.text.clone(),
                        metadata: doc.metadata.clone(),
                    }
                })
                .collect()
        )
    }
}

fn term_frequencies(text: &str) -> HashMap<String, f32> {
    let mut terms = HashMap::new();
    for token in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase) {
        *terms.entry(token).or_insert(0.0) += 1.0;
    }
    terms
}

fn vector_norm(terms: &HashMap<String, f32>) -> f32 {
    terms
        .values()
        .map(|v| v * v)
        .sum::<f32>()
        .sqrt()
}

fn cosine(query: &HashMap<String, f32>, query_norm: f32, doc: &IndexedDocument) -> f32 {
    if query_norm == 0.0 || doc.norm == 0.0 {
        return 0.0;
    }
    let dot: f32 = query
        .iter()
        .filter_map(|(term, weight)| doc.terms.get(term).map(|w| w * weight))
        .sum();
    dot / (query_norm * doc.norm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::Category;

    #[tokio::test]
    async fn test_search_ranks_by_overlap_within_category() {
        let index = LexicalIndex::seeded();
        let hits = index
            .search("How should I test SHA-256 encryption?", &Category::Security.into(), 1).await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].text.contains("SHA-256"));
    }

    #[tokio::test]
    async fn test_search_never_crosses_categories() {
        let mut index = LexicalIndex::new();
        index.add("Rule: login must be under 200ms.", &[("category", "technical")]);
        let hits = index
            .search("login 200ms", &Category::Security.into(), 1).await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_zero_overlap_still_returns_nearest_in_category() {
        let index = LexicalIndex::seeded();
        let hits = index
            .search("zzz", &Category::Technical.into(), 5).await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].text.contains("200ms"));
    }
}
