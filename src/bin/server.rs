//! QA server binary
//!
//! Run with: cargo run --bin corpus-rag-server

use corpus_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "corpus_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = RagConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!(
        "  - Embedding model: {} ({} dims)",
        config.embedding.model,
        config.embedding.dimensions
    );
    tracing::info!("  - Generation model: {}", config.generation.model);
    tracing::info!("  - Index host: {}", config.index.host);

    // Create and start server
    let server = RagServer::new(config)?;

    tracing::info!("Endpoints:");
    tracing::info!("  POST /ingest                  - Submit a document");
    tracing::info!("  GET  /ingestion-progress/:id  - Poll ingestion progress");
    tracing::info!("  POST /qa                      - Ask a question");
    tracing::info!("  GET  /documents               - Index statistics");

    server.start().await?;

    Ok(())
}
