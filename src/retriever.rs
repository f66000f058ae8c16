//! Query-time retrieval: embed a query, fetch the nearest chunks.

use std::sync::Arc;

use tracing::info;

use crate::config::RagConfig;
use crate::document::RetrievedSource;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::vectorstore::VectorStore;

/// Orchestrates embedding a query and fetching the top-k nearest chunks.
///
/// Depends only on the [`EmbeddingProvider`] and [`VectorStore`] traits,
/// never on backend specifics. Provider and store errors propagate to the
/// caller unchanged; there is no retry at this layer.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl Retriever {
    /// Create a retriever over the given embedder and store, using the
    /// default configuration's `top_k`.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self::with_config(embedder, store, &RagConfig::default())
    }

    /// Create a retriever whose [`search`](Retriever::search) uses the
    /// configured `top_k`.
    pub fn with_config(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        config: &RagConfig,
    ) -> Self {
        Self { embedder, store, top_k: config.top_k }
    }

    /// Return the chunks most similar to `query` using the configured
    /// `top_k`, best first.
    pub async fn search(&self, query: &str) -> Result<Vec<RetrievedSource>> {
        self.search_similar(query, self.top_k).await
    }

    /// Return up to `k` chunks most similar to `query`, best first.
    ///
    /// An empty or whitespace-only query short-circuits to an empty result
    /// without calling the embedding provider.
    pub async fn search_similar(&self, query: &str, k: usize) -> Result<Vec<RetrievedSource>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;
        let results = self.store.query(&query_embedding, k).await?;

        info!(result_count = results.len(), k, "similarity search completed");
        Ok(results)
    }
}
