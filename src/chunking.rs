//! Page-text chunking.
//!
//! This module provides the [`Chunker`] trait and its paragraph-oriented
//! implementation, [`ParagraphChunker`], which accumulates whole paragraphs
//! into overlapping passages sized for embedding and generation context.

use crate::document::Chunk;

/// A strategy for splitting per-page text into chunks.
///
/// Implementations produce [`Chunk`]s with content and provenance but no
/// embeddings. Embeddings are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split one page of text into ordered chunks.
    ///
    /// `page` is 1-based. Returns an empty `Vec` for empty page text.
    fn chunk_page(&self, source: &str, page: u32, page_text: &str) -> Vec<Chunk>;
}

/// Accumulates paragraphs into overlapping chunks near a target size.
///
/// Page text is split on blank-line boundaries into paragraphs (trimmed,
/// empties dropped). Paragraphs are appended to a running buffer; when the
/// next paragraph would push the buffer past `target` characters, the buffer
/// is flushed as a chunk and the next buffer is seeded with the flushed
/// buffer's trailing `overlap` characters so boundary context is not lost.
///
/// A single paragraph longer than `target` is never split mid-paragraph:
/// it is emitted whole, so actual chunk length can exceed `target`.
#[derive(Debug, Clone)]
pub struct ParagraphChunker {
    target: usize,
    overlap: usize,
}

impl ParagraphChunker {
    /// Create a new `ParagraphChunker`.
    ///
    /// # Arguments
    ///
    /// * `target` — target chunk size in characters
    /// * `overlap` — trailing characters carried into the next chunk
    pub fn new(target: usize, overlap: usize) -> Self {
        Self { target, overlap }
    }
}

impl Default for ParagraphChunker {
    fn default() -> Self {
        Self::new(1400, 200)
    }
}

/// The trailing `overlap` characters of `text`, on a char boundary.
fn tail_chars(text: &str, overlap: usize) -> &str {
    let count = text.chars().count();
    if count <= overlap {
        return text;
    }
    match text.char_indices().nth(count - overlap) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

impl Chunker for ParagraphChunker {
    fn chunk_page(&self, source: &str, page: u32, page_text: &str) -> Vec<Chunk> {
        let paragraphs =
            page_text.split("\n\n").map(str::trim).filter(|p| !p.is_empty());

        let mut chunks = Vec::new();
        let mut buf = String::new();
        let mut buf_chars = 0usize;

        for paragraph in paragraphs {
            let paragraph_chars = paragraph.chars().count();
            // "\n\n" joiner counts toward the target, as in the reference.
            let appended_chars = if buf.is_empty() {
                paragraph_chars
            } else {
                buf_chars + 2 + paragraph_chars
            };

            if appended_chars > self.target && !buf.is_empty() {
                chunks.push(Chunk::new(source, page, buf.trim().to_string()));
                let tail = tail_chars(&buf, self.overlap).to_string();
                buf = format!("{tail}\n\n{paragraph}");
                buf_chars = tail.chars().count() + 2 + paragraph_chars;
            } else if buf.is_empty() {
                buf = paragraph.to_string();
                buf_chars = paragraph_chars;
            } else {
                buf.push_str("\n\n");
                buf.push_str(paragraph);
                buf_chars = appended_chars;
            }
        }

        if !buf.trim().is_empty() {
            chunks.push(Chunk::new(source, page, buf.trim().to_string()));
        }

        chunks
    }
}
