//! Error types for the `thesis-rag` crate.

use thiserror::Error;

/// Errors that can occur in retrieval-pipeline operations.
///
/// The core performs no local recovery: every failure surfaces unchanged
/// to its immediate caller.
#[derive(Debug, Error)]
pub enum RagError {
    /// The source document could not be read or split into pages.
    #[error("Extraction error: {0}")]
    ExtractionError(String),

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStoreError {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error in the ingestion or query orchestration.
    #[error("Pipeline error: {0}")]
    PipelineError(String),
}

/// A convenience result type for retrieval-pipeline operations.
pub type Result<T> = std::result::Result<T, RagError>;
