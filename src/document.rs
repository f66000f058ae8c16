//! Data types for chunks and retrieved sources.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for deriving chunk identifiers from their content.
const CHUNK_ID_NAMESPACE: Uuid = Uuid::from_bytes([
    0x8a, 0x1d, 0x30, 0x5f, 0x6c, 0x2e, 0x4b, 0x9a, 0xb4, 0x7d, 0x2f, 0x91, 0x0c, 0x5e, 0xd6,
    0x33,
]);

/// A contiguous span of document text, the unit of embedding and retrieval.
///
/// Chunks are created only by the ingestion pipeline and are immutable once
/// written to a store. The `embedding` field is empty until the pipeline
/// attaches a vector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier, derived deterministically from the chunk's
    /// provenance and content (see [`Chunk::derive_id`]).
    pub id: String,
    /// 1-based source page number the chunk was extracted from.
    pub page: u32,
    /// Chunk text, trimmed of leading and trailing whitespace.
    pub content: String,
    /// Length proxy (character count) stored alongside for diagnostics.
    pub tokens: usize,
    /// The vector embedding for this chunk's content.
    pub embedding: Vec<f32>,
    /// Key-value metadata, at minimum recording `source` provenance.
    pub metadata: HashMap<String, String>,
}

impl Chunk {
    /// Create a chunk with a content-derived id and no embedding.
    pub fn new(source: &str, page: u32, content: String) -> Self {
        let tokens = content.chars().count();
        let id = Self::derive_id(source, page, &content);
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), source.to_string());
        Self { id, page, content, tokens, embedding: Vec::new(), metadata }
    }

    /// Derive a stable chunk id from `(source, page, content)`.
    ///
    /// Re-ingesting an unchanged document re-derives identical ids, so the
    /// store's idempotent upsert no-ops instead of accumulating duplicates.
    pub fn derive_id(source: &str, page: u32, content: &str) -> String {
        let name = format!("{source}:{page}:{content}");
        Uuid::new_v5(&CHUNK_ID_NAMESPACE, name.as_bytes()).to_string()
    }
}

/// A scored projection of a [`Chunk`] returned from a similarity query.
///
/// Ephemeral: constructed per query, never persisted. `score` is a
/// normalized similarity in `[0, 1]`, higher is more relevant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievedSource {
    /// Identifier of the underlying chunk.
    pub id: String,
    /// 1-based source page number.
    pub page: u32,
    /// Full chunk text.
    pub content: String,
    /// Normalized similarity score in `[0, 1]`.
    pub score: f32,
}

impl RetrievedSource {
    /// A short preview of `content`, truncated at a character boundary with
    /// a trailing ellipsis when the content exceeds `max_chars`.
    pub fn snippet(&self, max_chars: usize) -> String {
        if self.content.chars().count() <= max_chars {
            return self.content.clone();
        }
        let truncated: String = self.content.chars().take(max_chars).collect();
        format!("{truncated}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_ids_are_stable() {
        let a = Chunk::derive_id("thesis.pdf", 3, "some paragraph");
        let b = Chunk::derive_id("thesis.pdf", 3, "some paragraph");
        assert_eq!(a, b);
    }

    #[test]
    fn derived_ids_distinguish_page_and_content() {
        let base = Chunk::derive_id("thesis.pdf", 3, "some paragraph");
        assert_ne!(base, Chunk::derive_id("thesis.pdf", 4, "some paragraph"));
        assert_ne!(base, Chunk::derive_id("thesis.pdf", 3, "another paragraph"));
        assert_ne!(base, Chunk::derive_id("other.pdf", 3, "some paragraph"));
    }

    #[test]
    fn new_chunk_records_provenance_and_tokens() {
        let chunk = Chunk::new("thesis.pdf", 2, "héllo".to_string());
        assert_eq!(chunk.page, 2);
        assert_eq!(chunk.tokens, 5);
        assert_eq!(chunk.metadata.get("source").map(String::as_str), Some("thesis.pdf"));
        assert!(chunk.embedding.is_empty());
    }

    #[test]
    fn snippet_truncates_long_content() {
        let source = RetrievedSource {
            id: "x".into(),
            page: 1,
            content: "abcdef".into(),
            score: 1.0,
        };
        assert_eq!(source.snippet(4), "abcd…");
        assert_eq!(source.snippet(6), "abcdef");
    }
}
