//! Context assembly for prompt consumption.

use crate::document::RetrievedSource;

/// Delimiter between rendered source blocks.
const BLOCK_DELIMITER: &str = "\n\n---\n\n";

/// Render retrieved sources into a single numbered, citable text block.
///
/// Each source becomes a block carrying a 1-based citation marker `[#n]`
/// (n is the position in the input sequence), its page number, its id, and
/// its full content. The numbering is the join key used by the downstream
/// generation step when it emits `[#n]` citation markers in prose, so it
/// must stay 1-based and input-ordered.
pub fn build_context(sources: &[RetrievedSource]) -> String {
    sources
        .iter()
        .enumerate()
        .map(|(i, s)| format!("[#{}] page {} — id={}\n{}", i + 1, s.page, s.id, s.content))
        .collect::<Vec<_>>()
        .join(BLOCK_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(id: &str, page: u32, content: &str) -> RetrievedSource {
        RetrievedSource { id: id.to_string(), page, content: content.to_string(), score: 0.9 }
    }

    #[test]
    fn numbers_sources_in_input_order() {
        let context = build_context(&[source("x1", 5, "Foo"), source("x2", 6, "Bar")]);

        let first = context.find("[#1] page 5 — id=x1\nFoo").expect("first block");
        let second = context.find("[#2] page 6 — id=x2\nBar").expect("second block");
        assert!(first < second);
        assert!(context.contains("---"));
    }

    #[test]
    fn empty_input_renders_empty_context() {
        assert_eq!(build_context(&[]), "");
    }
}
