//! Configuration for the retrieval pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// How the pipeline drives the embedding provider during ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EmbeddingMode {
    /// Submit all inputs in a single provider call. Fails as a whole if the
    /// provider call fails; no partial results.
    Batch,
    /// Process inputs strictly one at a time for quota-constrained
    /// providers, sleeping between requests and logging progress at a
    /// fixed cadence.
    Sequential {
        /// Minimum delay between consecutive provider calls, in
        /// milliseconds. No delay after the final item.
        inter_request_delay_ms: u64,
        /// Emit a progress event every N items.
        progress_every_n: usize,
    },
}

impl Default for EmbeddingMode {
    /// The reference behavior: one request at a time with a 2 s pause,
    /// progress every 10 items. Safe for free-tier provider quotas.
    fn default() -> Self {
        Self::Sequential { inter_request_delay_ms: 2000, progress_every_n: 10 }
    }
}

/// Configuration parameters for the retrieval pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Target chunk size in characters. Chunks may exceed this only when a
    /// single paragraph is longer than the target.
    pub chunk_target: usize,
    /// Number of trailing characters carried over into the next chunk.
    pub chunk_overlap: usize,
    /// Number of top results to return from vector search.
    pub top_k: usize,
    /// How the embedding provider is driven during ingestion.
    pub embedding_mode: EmbeddingMode,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_target: 1400,
            chunk_overlap: 200,
            top_k: 6,
            embedding_mode: EmbeddingMode::default(),
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the target chunk size in characters.
    pub fn chunk_target(mut self, target: usize) -> Self {
        self.config.chunk_target = target;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of top results to return from vector search.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the embedding drive mode.
    pub fn embedding_mode(mut self, mode: EmbeddingMode) -> Self {
        self.config.embedding_mode = mode;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `chunk_overlap >= chunk_target`
    /// - `chunk_target == 0` or `top_k == 0`
    /// - sequential mode has `progress_every_n == 0`
    pub fn build(self) -> Result<RagConfig> {
        if self.config.chunk_target == 0 {
            return Err(RagError::ConfigError("chunk_target must be greater than zero".to_string()));
        }
        if self.config.chunk_overlap >= self.config.chunk_target {
            return Err(RagError::ConfigError(format!(
                "chunk_overlap ({}) must be less than chunk_target ({})",
                self.config.chunk_overlap, self.config.chunk_target
            )));
        }
        if self.config.top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        if let EmbeddingMode::Sequential { progress_every_n, .. } = self.config.embedding_mode {
            if progress_every_n == 0 {
                return Err(RagError::ConfigError(
                    "progress_every_n must be greater than zero".to_string(),
                ));
            }
        }
        Ok(self.config)
    }
}
