//! Document text extraction seam.
//!
//! PDF parsing is out of scope for the core; the pipeline consumes any
//! collaborator that yields ordered per-page plain text through the
//! [`PageExtractor`] trait.

use std::path::Path;

use async_trait::async_trait;

use crate::error::{RagError, Result};

/// Yields the ordered per-page plain text of a source document.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Extract per-page text from the document at `path`, in page order.
    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// Reads a plain-text file with form-feed (`\x0c`) page breaks.
///
/// Useful for pre-extracted documents (e.g. `pdftotext` output) and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFileExtractor;

#[async_trait]
impl PageExtractor for TextFileExtractor {
    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            RagError::ExtractionError(format!("failed to read {}: {e}", path.display()))
        })?;

        Ok(text.split('\u{0c}').map(|page| page.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn splits_pages_on_form_feed() {
        let dir = std::env::temp_dir();
        let path = dir.join("thesis_rag_extract_test.txt");
        tokio::fs::write(&path, "page one\u{0c}page two\u{0c}page three")
            .await
            .unwrap();

        let pages = TextFileExtractor.extract_pages(&path).await.unwrap();
        assert_eq!(pages, vec!["page one", "page two", "page three"]);

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn missing_file_is_an_extraction_error() {
        let err = TextFileExtractor
            .extract_pages(Path::new("/definitely/not/here.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, RagError::ExtractionError(_)));
    }
}
