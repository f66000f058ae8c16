//! Ingestion pipeline: extract → chunk → embed → store.
//!
//! [`IngestionPipeline`] composes a [`PageExtractor`], a [`Chunker`], an
//! [`EmbeddingProvider`], and a [`VectorStore`] into a one-shot batch job
//! that populates the store from a source document. Construct one via
//! [`IngestionPipeline::builder()`].

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::chunking::{Chunker, ParagraphChunker};
use crate::config::{EmbeddingMode, RagConfig};
use crate::document::Chunk;
use crate::embedding::{EmbeddingProvider, RateLimitedEmbedder};
use crate::error::{RagError, Result};
use crate::extract::PageExtractor;
use crate::vectorstore::VectorStore;

/// A one-shot batch job populating a vector store from a source document.
///
/// Steps run sequentially with no concurrency; chunks are embedded and
/// upserted in the exact order produced by the chunker (page order, then
/// within-page emission order). Any unrecoverable failure aborts the run;
/// writes already committed to the store remain (at-least-once ingestion,
/// relying on content-derived ids and idempotent upsert for safe re-runs).
pub struct IngestionPipeline {
    extractor: Arc<dyn PageExtractor>,
    chunker: Arc<dyn Chunker>,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    config: RagConfig,
}

impl IngestionPipeline {
    /// Create a new [`IngestionPipelineBuilder`].
    pub fn builder() -> IngestionPipelineBuilder {
        IngestionPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Ingest one document: extract pages, chunk, embed, upsert.
    ///
    /// Returns the number of chunks written.
    ///
    /// # Errors
    ///
    /// Returns the first extraction, embedding, or store failure unchanged.
    /// Embedding vectors that do not match the provider's declared
    /// dimensionality abort the run with [`RagError::PipelineError`] before
    /// anything is written.
    pub async fn ingest(&self, path: &Path) -> Result<usize> {
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        info!(path = %path.display(), "reading document");
        let pages = self.extractor.extract_pages(path).await?;

        info!(page_count = pages.len(), "chunking");
        let mut chunks: Vec<Chunk> = Vec::new();
        for (i, page_text) in pages.iter().enumerate() {
            let page = (i + 1) as u32;
            chunks.extend(self.chunker.chunk_page(&source, page, page_text));
        }

        if chunks.is_empty() {
            info!(source, chunk_count = 0, "nothing to ingest");
            return Ok(0);
        }

        info!(chunk_count = chunks.len(), "embedding chunks");
        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await.map_err(|e| {
            error!(source, error = %e, "embedding failed during ingestion");
            e
        })?;

        let dimensions = self.embedder.dimensions();
        if embeddings.len() != chunks.len() {
            return Err(RagError::PipelineError(format!(
                "provider returned {} embeddings for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }
        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            if embedding.len() != dimensions {
                return Err(RagError::PipelineError(format!(
                    "embedding dimensionality {} does not match provider dimensionality {dimensions}",
                    embedding.len()
                )));
            }
            chunk.embedding = embedding;
        }

        info!(chunk_count = chunks.len(), "upserting into vector store");
        self.store.batch_upsert(&chunks).await.map_err(|e| {
            error!(source, error = %e, "upsert failed during ingestion");
            e
        })?;

        let chunk_count = chunks.len();
        info!(source, chunk_count, "ingestion complete");
        Ok(chunk_count)
    }
}

/// Builder for constructing an [`IngestionPipeline`].
///
/// The extractor, embedder, and store are required; `config` defaults to
/// [`RagConfig::default()`] and the chunker defaults to a
/// [`ParagraphChunker`] built from the config's `chunk_target` and
/// `chunk_overlap`. When the config selects [`EmbeddingMode::Sequential`],
/// the embedding provider is wrapped in a [`RateLimitedEmbedder`] at build
/// time.
#[derive(Default)]
pub struct IngestionPipelineBuilder {
    extractor: Option<Arc<dyn PageExtractor>>,
    chunker: Option<Arc<dyn Chunker>>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    store: Option<Arc<dyn VectorStore>>,
    config: Option<RagConfig>,
}

impl IngestionPipelineBuilder {
    /// Set the page extractor.
    pub fn extractor(mut self, extractor: Arc<dyn PageExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Set the chunker. Defaults to a [`ParagraphChunker`] built from the
    /// config's `chunk_target` and `chunk_overlap`.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store backend.
    pub fn store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the pipeline configuration. Defaults to [`RagConfig::default()`].
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the [`IngestionPipeline`], validating that all required
    /// components are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if any required component is
    /// missing.
    pub fn build(self) -> Result<IngestionPipeline> {
        let extractor = self
            .extractor
            .ok_or_else(|| RagError::ConfigError("extractor is required".to_string()))?;
        let embedder = self
            .embedder
            .ok_or_else(|| RagError::ConfigError("embedder is required".to_string()))?;
        let store =
            self.store.ok_or_else(|| RagError::ConfigError("store is required".to_string()))?;
        let config = self.config.unwrap_or_default();
        let chunker = self.chunker.unwrap_or_else(|| {
            Arc::new(ParagraphChunker::new(config.chunk_target, config.chunk_overlap))
        });

        let embedder: Arc<dyn EmbeddingProvider> = match config.embedding_mode {
            EmbeddingMode::Batch => embedder,
            EmbeddingMode::Sequential { inter_request_delay_ms, progress_every_n } => {
                Arc::new(RateLimitedEmbedder::new(
                    embedder,
                    Duration::from_millis(inter_request_delay_ms),
                    progress_every_n,
                ))
            }
        };

        Ok(IngestionPipeline { extractor, chunker, embedder, store, config })
    }
}
