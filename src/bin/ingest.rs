//! One-shot batch ingestion of a source document into a vector store.
//!
//! Reads a plain-text document (form-feed page breaks, e.g. `pdftotext`
//! output), chunks and embeds it, and upserts the chunks into the selected
//! backend. Progress is written to the console; a fatal error exits
//! non-zero. Partial writes from an aborted run stay in the store and are
//! deduplicated on re-run by the content-derived chunk ids.

use std::path::PathBuf;
use std::sync::Arc;

#[cfg(feature = "pgvector")]
use anyhow::Context;
use clap::{Parser, ValueEnum};

use thesis_rag::{
    EmbeddingMode, EmbeddingProvider, GeminiEmbeddingProvider, IngestionPipeline,
    InMemoryVectorStore, RagConfig, TextFileExtractor, VectorStore,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// In-memory store; useful as a dry run of chunking and embedding.
    Memory,
    /// PostgreSQL with the pgvector extension (requires the `pgvector` feature).
    Postgres,
    /// Qdrant managed index (requires the `qdrant` feature).
    Qdrant,
}

#[derive(Debug, Parser)]
#[command(name = "ingest", about = "Ingest a document into the retrieval store")]
struct Args {
    /// Path to the source document (plain text with form-feed page breaks).
    #[arg(env = "THESIS_FILE_PATH")]
    path: PathBuf,

    /// Vector store backend to write to.
    #[arg(long, value_enum, default_value_t = Backend::Memory)]
    backend: Backend,

    /// PostgreSQL connection URL (postgres backend).
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Qdrant gRPC URL (qdrant backend).
    #[arg(long, env = "QDRANT_URL", default_value = "http://localhost:6334")]
    qdrant_url: String,

    /// Corpus name (table or collection the chunks land in).
    #[arg(long, default_value = "thesis")]
    corpus: String,

    /// Target chunk size in characters.
    #[arg(long, default_value_t = 1400)]
    chunk_target: usize,

    /// Overlap carried between consecutive chunks, in characters.
    #[arg(long, default_value_t = 200)]
    chunk_overlap: usize,

    /// Embed all chunks in one provider call instead of one at a time.
    #[arg(long)]
    batch: bool,

    /// Delay between embedding requests in sequential mode, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    delay_ms: u64,

    /// Emit a progress line every N embedded chunks in sequential mode.
    #[arg(long, default_value_t = 10)]
    progress_every: usize,

    /// Drop and recreate the backing index before ingesting.
    #[arg(long)]
    recreate_index: bool,
}

async fn build_store(args: &Args) -> anyhow::Result<Arc<dyn VectorStore>> {
    match args.backend {
        Backend::Memory => Ok(Arc::new(InMemoryVectorStore::new())),
        Backend::Postgres => {
            #[cfg(feature = "pgvector")]
            {
                let url = args
                    .database_url
                    .as_deref()
                    .context("--database-url (or DATABASE_URL) is required for postgres")?;
                let store = thesis_rag::PgVectorStore::new(url, &args.corpus).await?;
                return Ok(Arc::new(store));
            }
            #[cfg(not(feature = "pgvector"))]
            anyhow::bail!("this binary was built without the `pgvector` feature")
        }
        Backend::Qdrant => {
            #[cfg(feature = "qdrant")]
            {
                let store = thesis_rag::QdrantVectorStore::new(&args.qdrant_url, &args.corpus)?;
                return Ok(Arc::new(store));
            }
            #[cfg(not(feature = "qdrant"))]
            anyhow::bail!("this binary was built without the `qdrant` feature")
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();

    let embedding_mode = if args.batch {
        EmbeddingMode::Batch
    } else {
        EmbeddingMode::Sequential {
            inter_request_delay_ms: args.delay_ms,
            progress_every_n: args.progress_every,
        }
    };

    let config = RagConfig::builder()
        .chunk_target(args.chunk_target)
        .chunk_overlap(args.chunk_overlap)
        .embedding_mode(embedding_mode)
        .build()?;

    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(GeminiEmbeddingProvider::from_env()?);
    let store = build_store(&args).await?;

    if args.recreate_index {
        store.delete_index().await?;
    }
    store.create_index(embedder.dimensions()).await?;

    let pipeline = IngestionPipeline::builder()
        .extractor(Arc::new(TextFileExtractor))
        .embedder(embedder)
        .store(store)
        .config(config)
        .build()?;

    let count = pipeline.ingest(&args.path).await?;
    println!("Ingestion complete: {count} chunks written");

    Ok(())
}
