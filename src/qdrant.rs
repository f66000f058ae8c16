//! Qdrant vector store backend.
//!
//! Provides [`QdrantVectorStore`] which implements [`VectorStore`] using
//! the [qdrant-client](https://docs.rs/qdrant-client) crate over gRPC.
//! This is the managed-index backend: the page and content travel as point
//! payload at upsert time and come back with each query hit, and the
//! similarity score is the index's native cosine score.
//!
//! # Example
//!
//! ```rust,ignore
//! use thesis_rag::qdrant::QdrantVectorStore;
//!
//! let store = QdrantVectorStore::new("http://localhost:6334", "thesis")?;
//! store.create_index(3072).await?;
//! store.batch_upsert(&chunks).await?;
//! let results = store.query(&query_embedding, 6).await?;
//! ```

use async_trait::async_trait;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    Value as QdrantValue, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use tracing::debug;

use crate::document::{Chunk, RetrievedSource};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// A [`VectorStore`] backed by [Qdrant](https://qdrant.tech/).
///
/// Wraps a [`qdrant_client::Qdrant`] client and maps the corpus to one
/// Qdrant collection with cosine distance. Because chunk ids are derived
/// from content, a repeated upsert rewrites an identical point, so the
/// no-silent-change contract of [`VectorStore::upsert`] holds.
pub struct QdrantVectorStore {
    client: Qdrant,
    collection: String,
}

impl QdrantVectorStore {
    /// Create a new Qdrant vector store connecting to the given URL.
    pub fn new(url: &str, corpus: impl Into<String>) -> Result<Self> {
        let client = Qdrant::from_url(url).build().map_err(Self::map_err)?;
        Ok(Self { client, collection: corpus.into() })
    }

    /// Create a new Qdrant vector store from an existing client.
    pub fn from_client(client: Qdrant, corpus: impl Into<String>) -> Self {
        Self { client, collection: corpus.into() }
    }

    fn map_err(e: qdrant_client::QdrantError) -> RagError {
        RagError::VectorStoreError { backend: "qdrant".to_string(), message: e.to_string() }
    }

    fn extract_string(value: &QdrantValue) -> Option<String> {
        match &value.kind {
            Some(Kind::StringValue(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn extract_integer(value: &QdrantValue) -> Option<i64> {
        match &value.kind {
            Some(Kind::IntegerValue(n)) => Some(*n),
            Some(Kind::DoubleValue(n)) => Some(*n as i64),
            _ => None,
        }
    }

    /// Build the point for a chunk, carrying `page`, `content`, and
    /// `tokens` as payload.
    ///
    /// A payload conversion failure is a store error, never an empty
    /// payload: a point stored without its page and content would be
    /// silently unretrievable.
    fn chunk_point(chunk: &Chunk) -> Result<PointStruct> {
        let mut payload_map = serde_json::Map::new();
        payload_map.insert("page".to_string(), serde_json::Value::Number(chunk.page.into()));
        payload_map
            .insert("content".to_string(), serde_json::Value::String(chunk.content.clone()));
        payload_map.insert("tokens".to_string(), serde_json::Value::Number(chunk.tokens.into()));

        let payload =
            Payload::try_from(serde_json::Value::Object(payload_map)).map_err(|e| {
                RagError::VectorStoreError {
                    backend: "qdrant".to_string(),
                    message: format!("failed to build point payload for '{}': {e}", chunk.id),
                }
            })?;

        Ok(PointStruct::new(chunk.id.clone(), chunk.embedding.clone(), payload))
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn create_index(&self, dimensions: usize) -> Result<()> {
        let collections = self.client.list_collections().await.map_err(Self::map_err)?;
        let exists = collections.collections.iter().any(|c| c.name == self.collection);
        if exists {
            debug!(collection = %self.collection, "qdrant collection already exists, skipping creation");
            return Ok(());
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(dimensions as u64, Distance::Cosine)),
            )
            .await
            .map_err(Self::map_err)?;

        debug!(collection = %self.collection, dimensions, "created qdrant collection");
        Ok(())
    }

    async fn delete_index(&self) -> Result<()> {
        self.client.delete_collection(&self.collection).await.map_err(Self::map_err)?;
        debug!(collection = %self.collection, "deleted qdrant collection");
        Ok(())
    }

    async fn upsert(&self, chunks: &[Chunk]) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let points: Vec<PointStruct> =
            chunks.iter().map(Self::chunk_point).collect::<Result<_>>()?;

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(Self::map_err)?;

        debug!(collection = %self.collection, count = chunks.len(), "upserted chunks to qdrant");
        Ok(())
    }

    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<RetrievedSource>> {
        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, embedding.to_vec(), top_k as u64)
                    .with_payload(true),
            )
            .await
            .map_err(Self::map_err)?;

        let results = response
            .result
            .into_iter()
            .map(|scored| {
                let id = scored
                    .id
                    .as_ref()
                    .and_then(|pid| match &pid.point_id_options {
                        Some(PointIdOptions::Uuid(s)) => Some(s.clone()),
                        Some(PointIdOptions::Num(n)) => Some(n.to_string()),
                        None => None,
                    })
                    .unwrap_or_default();

                let page = scored
                    .payload
                    .get("page")
                    .and_then(Self::extract_integer)
                    .unwrap_or(0)
                    .max(0) as u32;

                let content = scored
                    .payload
                    .get("content")
                    .and_then(Self::extract_string)
                    .unwrap_or_default();

                RetrievedSource { id, page, content, score: scored.score.clamp(0.0, 1.0) }
            })
            .collect();

        Ok(results)
    }
}
