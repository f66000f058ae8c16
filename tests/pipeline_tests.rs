//! End-to-end ingestion tests over the in-memory store.

mod common;

use std::path::PathBuf;
use std::sync::Arc;

use common::MockEmbedder;
use thesis_rag::{
    EmbeddingMode, IngestionPipeline, InMemoryVectorStore, ParagraphChunker, RagConfig,
    TextFileExtractor, VectorStore,
};

fn paragraph_block(letter: char, para_len: usize, count: usize) -> String {
    (0..count)
        .map(|_| std::iter::repeat(letter).take(para_len).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n\n")
}

async fn write_temp_document(name: &str, pages: &[String]) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    tokio::fs::write(&path, pages.join("\u{0c}")).await.unwrap();
    path
}

fn pipeline(
    embedder: Arc<MockEmbedder>,
    store: Arc<InMemoryVectorStore>,
) -> IngestionPipeline {
    IngestionPipeline::builder()
        .extractor(Arc::new(TextFileExtractor))
        .chunker(Arc::new(ParagraphChunker::default()))
        .embedder(embedder)
        .store(store)
        .config(
            RagConfig::builder()
                .embedding_mode(EmbeddingMode::Batch)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

#[tokio::test]
async fn long_first_page_splits_and_short_second_page_does_not() {
    // Page 1: 2000 characters of paragraph text (> 1400 target).
    // Page 2: 500 characters.
    let pages = vec![paragraph_block('a', 400, 5), paragraph_block('b', 500, 1)];
    let path = write_temp_document("thesis_rag_scenario1.txt", &pages).await;

    let store = Arc::new(InMemoryVectorStore::new());
    let count = pipeline(Arc::new(MockEmbedder::new(8)), store.clone())
        .ingest(&path)
        .await
        .unwrap();

    assert_eq!(count, store.len().await);

    let all = store.query(&[0.0; 8], 100).await.unwrap();
    let page1_chunks = all.iter().filter(|s| s.page == 1).count();
    let page2_chunks = all.iter().filter(|s| s.page == 2).count();
    assert!(page1_chunks >= 2, "expected page 1 to split, got {page1_chunks} chunk(s)");
    assert_eq!(page2_chunks, 1);

    tokio::fs::remove_file(&path).await.ok();
}

#[tokio::test]
async fn empty_document_writes_nothing() {
    let path = write_temp_document("thesis_rag_empty.txt", &[String::new()]).await;

    let store = Arc::new(InMemoryVectorStore::new());
    let count = pipeline(Arc::new(MockEmbedder::new(8)), store.clone())
        .ingest(&path)
        .await
        .unwrap();

    assert_eq!(count, 0);
    assert!(store.is_empty().await);

    tokio::fs::remove_file(&path).await.ok();
}

#[tokio::test]
async fn reingesting_an_unchanged_document_adds_no_rows() {
    let pages = vec![paragraph_block('a', 400, 5), paragraph_block('b', 300, 2)];
    let path = write_temp_document("thesis_rag_reingest.txt", &pages).await;

    let store = Arc::new(InMemoryVectorStore::new());
    let embedder = Arc::new(MockEmbedder::new(8));

    let first = pipeline(embedder.clone(), store.clone()).ingest(&path).await.unwrap();
    let after_first = store.len().await;
    assert_eq!(first, after_first);

    let second = pipeline(embedder, store.clone()).ingest(&path).await.unwrap();
    assert_eq!(second, first);
    assert_eq!(store.len().await, after_first, "re-ingestion duplicated chunks");

    tokio::fs::remove_file(&path).await.ok();
}

#[tokio::test]
async fn missing_required_component_fails_to_build() {
    let err = IngestionPipeline::builder().build();
    assert!(err.is_err());
}

#[tokio::test]
async fn default_chunker_honors_configured_target_and_overlap() {
    // 2000 characters of 40-char paragraphs with a 100-char target: the
    // builder must derive its chunker from the config, not the crate
    // defaults, so no stored chunk may exceed the configured target.
    let pages = vec![paragraph_block('a', 40, 50)];
    let path = write_temp_document("thesis_rag_config_chunker.txt", &pages).await;

    let store = Arc::new(InMemoryVectorStore::new());
    let pipeline = IngestionPipeline::builder()
        .extractor(Arc::new(TextFileExtractor))
        .embedder(Arc::new(MockEmbedder::new(8)))
        .store(store.clone())
        .config(
            RagConfig::builder()
                .chunk_target(100)
                .chunk_overlap(20)
                .embedding_mode(EmbeddingMode::Batch)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let count = pipeline.ingest(&path).await.unwrap();
    assert!(count > 1);

    let all = store.query(&[0.0; 8], 1000).await.unwrap();
    assert_eq!(all.len(), count);
    for source in &all {
        let len = source.content.chars().count();
        assert!(len <= 100, "chunk of {len} chars ignores the configured target");
    }

    tokio::fs::remove_file(&path).await.ok();
}
