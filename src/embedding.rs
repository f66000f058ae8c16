//! Embedding provider trait and the rate-limited sequential wrapper.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;

/// A provider that generates vector embeddings from text input.
///
/// Implementations wrap specific embedding backends behind a unified async
/// interface. The default [`embed_batch`](EmbeddingProvider::embed_batch)
/// implementation calls [`embed`](EmbeddingProvider::embed) sequentially;
/// backends that support native batching should override it.
///
/// Vectors returned by one provider always have the dimensionality reported
/// by [`dimensions`](EmbeddingProvider::dimensions). Mixing vectors from
/// different providers in one store corrupts search.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs.
    ///
    /// Order-preserving: one vector per input, same order as the input.
    /// A provider error on any item aborts the whole call; there is no
    /// retry or skip at this layer.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}

/// Drives an inner provider strictly one request at a time with a fixed
/// inter-request delay, for providers with strict per-request quotas.
///
/// `embed_batch` processes inputs sequentially, sleeping
/// `inter_request_delay` between calls (never after the final item) and
/// logging progress every `progress_every_n` items so long-running
/// ingestion is observable. Single-item `embed` calls pass through
/// undelayed.
pub struct RateLimitedEmbedder {
    inner: Arc<dyn EmbeddingProvider>,
    inter_request_delay: Duration,
    progress_every_n: usize,
}

impl RateLimitedEmbedder {
    /// Wrap `inner` with a fixed `inter_request_delay` between batch items
    /// and a progress event every `progress_every_n` items.
    pub fn new(
        inner: Arc<dyn EmbeddingProvider>,
        inter_request_delay: Duration,
        progress_every_n: usize,
    ) -> Self {
        Self { inner, inter_request_delay, progress_every_n: progress_every_n.max(1) }
    }
}

#[async_trait]
impl EmbeddingProvider for RateLimitedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.inner.embed(text).await
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let total = texts.len();
        let mut results = Vec::with_capacity(total);

        for (i, text) in texts.iter().enumerate() {
            if i % self.progress_every_n == 0 {
                info!(current = i + 1, total, "embedding progress");
            }

            results.push(self.inner.embed(text).await?);

            if i + 1 < total {
                tokio::time::sleep(self.inter_request_delay).await;
            }
        }

        info!(total, "embedding complete");
        Ok(results)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }
}
