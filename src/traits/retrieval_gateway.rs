use async_trait::async_trait;

use crate::errors::GatewayError;
use crate::models::document::{ SearchFilter, SearchHit };

/// Opaque vector-similarity search over the reference corpus
#[async_trait]
pub trait RetrievalGateway: Send + Sync {
    /// Best `top_k` hits for `query` among documents matching `filter`.
    /// An empty vector is a valid answer.
    async fn search(
        &self,
        query: &str,
        filter: &SearchFilter,
        top_k: usize
    ) -> Result<Vec<SearchHit>, GatewayError>;
}
