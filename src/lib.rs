//! # thesis-rag
//!
//! Retrieval pipeline for a single long document: page-text chunking,
//! embedding generation, vector storage and query, and context assembly
//! for a downstream generation step.
//!
//! The ingestion path ([`IngestionPipeline`]) populates a [`VectorStore`]
//! from a source document; the query path ([`Retriever`] +
//! [`build_context`]) embeds a question, fetches the top-k nearest chunks,
//! and renders them into a numbered, citable context block. Answer
//! generation itself is left to the caller.
//!
//! Storage backends are feature-gated: `pgvector` (PostgreSQL with a
//! vector column), `qdrant` (managed nearest-neighbor index), with an
//! always-available in-memory store for development and tests. The
//! `gemini` feature enables the Gemini embedding provider.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use thesis_rag::{
//!     build_context, IngestionPipeline, InMemoryVectorStore, ParagraphChunker,
//!     RagConfig, Retriever, TextFileExtractor,
//! };
//!
//! let store = Arc::new(InMemoryVectorStore::new());
//! let embedder = Arc::new(my_embedding_provider());
//!
//! let pipeline = IngestionPipeline::builder()
//!     .extractor(Arc::new(TextFileExtractor))
//!     .chunker(Arc::new(ParagraphChunker::default()))
//!     .embedder(embedder.clone())
//!     .store(store.clone())
//!     .config(RagConfig::default())
//!     .build()?;
//! pipeline.ingest("thesis.txt".as_ref()).await?;
//!
//! let retriever = Retriever::new(embedder, store);
//! let sources = retriever.search_similar("what is the main claim?", 6).await?;
//! let context = build_context(&sources);
//! ```

pub mod chunking;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod inmemory;
pub mod pipeline;
pub mod retriever;
pub mod vectorstore;

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "pgvector")]
pub mod pgvector;

#[cfg(feature = "qdrant")]
pub mod qdrant;

pub use chunking::{Chunker, ParagraphChunker};
pub use config::{EmbeddingMode, RagConfig, RagConfigBuilder};
pub use context::build_context;
pub use document::{Chunk, RetrievedSource};
pub use embedding::{EmbeddingProvider, RateLimitedEmbedder};
pub use error::{RagError, Result};
pub use extract::{PageExtractor, TextFileExtractor};
pub use inmemory::InMemoryVectorStore;
pub use pipeline::{IngestionPipeline, IngestionPipelineBuilder};
pub use retriever::Retriever;
pub use vectorstore::{VectorStore, UPSERT_BATCH_SIZE};

#[cfg(feature = "gemini")]
pub use gemini::GeminiEmbeddingProvider;

#[cfg(feature = "pgvector")]
pub use pgvector::PgVectorStore;

#[cfg(feature = "qdrant")]
pub use qdrant::QdrantVectorStore;
