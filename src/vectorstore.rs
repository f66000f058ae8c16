//! Vector store trait for persisting chunks and answering similarity queries.

use async_trait::async_trait;
use tracing::info;

use crate::document::{Chunk, RetrievedSource};
use crate::error::Result;

/// Number of vectors written per batch by the default
/// [`batch_upsert`](VectorStore::batch_upsert), matching managed-index
/// payload limits.
pub const UPSERT_BATCH_SIZE: usize = 100;

/// A storage backend for embedded chunks with nearest-neighbor search.
///
/// All backends satisfy the same contract so callers never special-case
/// backend type: `upsert` is idempotent by chunk id (a conflicting id is a
/// no-op, never a silent overwrite of different content), and `query`
/// scores are always normalized into `[0, 1]`, best first.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the backing index/table for vectors of the given
    /// dimensionality. No-op if it already exists.
    async fn create_index(&self, dimensions: usize) -> Result<()>;

    /// Delete the backing index/table and all its data.
    async fn delete_index(&self) -> Result<()>;

    /// Upsert chunks by id. Chunks must have embeddings attached.
    async fn upsert(&self, chunks: &[Chunk]) -> Result<()>;

    /// Upsert chunks in fixed-size batches, logging per-batch progress.
    ///
    /// The default implementation splits the input into
    /// [`UPSERT_BATCH_SIZE`] batches and delegates each to
    /// [`upsert`](VectorStore::upsert), preserving input order.
    async fn batch_upsert(&self, chunks: &[Chunk]) -> Result<()> {
        let total_batches = chunks.len().div_ceil(UPSERT_BATCH_SIZE);
        for (i, batch) in chunks.chunks(UPSERT_BATCH_SIZE).enumerate() {
            self.upsert(batch).await?;
            info!(batch = i + 1, total_batches, "upserted batch");
        }
        Ok(())
    }

    /// Return the `top_k` most similar chunks to the given embedding,
    /// ordered by descending score.
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<RetrievedSource>>;
}
