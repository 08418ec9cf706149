use std::sync::Arc;

use log::{ debug, info };

use crate::errors::{ QaError, QaResult };
use crate::models::common::Category;
use crate::models::document::{ GroundingDocument, SearchFilter };
use crate::traits::retrieval_gateway::RetrievalGateway;

/// Fetches the single best grounding document within a category
#[derive(Clone)]
pub struct Retriever {
    gateway: Arc<dyn RetrievalGateway>,
}

impl Retriever {
    pub fn new(gateway: Arc<dyn RetrievalGateway>) -> Self {
        Self { gateway }
    }

    /// Top-1 filtered search. `None` means the category holds nothing for this query.
    pub async fn retrieve(
        &self,
        query: &str,
        category: Category
    ) -> QaResult<Option<GroundingDocument>> {
        let filter = SearchFilter::from(category);
        let hits = self.gateway.search(query, &filter, 1).await.map_err(QaError::from_retrieval)?;

        let document = hits.into_iter().next().map(GroundingDocument::from);
        match &document {
            Some(doc) => {
                info!("Retrieved grounding document from {}", doc.source());
                debug!("Context: {}", doc.text);
            }
            None => info!("No grounding document tagged '{}'", category),
        }
        Ok(document)
    }
}
