//! Application state for the QA server

use std::sync::Arc;

use crate::answer::AnswerPipeline;
use crate::config::RagConfig;
use crate::error::Result;
use crate::ingestion::IngestionPipeline;
use crate::progress::IngestionTracker;
use crate::providers::{
    openai::{OpenAiEmbedder, OpenAiGenerator},
    pinecone::PineconeClient,
    AnswerProvider, EmbeddingProvider, VectorIndex,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Progress tracker shared with the ingestion pipeline
    tracker: Arc<IngestionTracker>,
    /// Vector index, also queried directly for statistics
    index: Arc<dyn VectorIndex>,
    /// Ingestion pipeline
    ingestion: IngestionPipeline,
    /// Answer pipeline
    answer: AnswerPipeline,
}

impl AppState {
    /// Create new application state from configuration
    pub fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(OpenAiEmbedder::new(&config.embedding)?);
        tracing::info!(
            "Embedding provider initialized ({}, {} dims)",
            embedder.name(),
            embedder.dimensions()
        );

        let index: Arc<dyn VectorIndex> = Arc::new(PineconeClient::new(&config.index)?);
        tracing::info!("Vector index client initialized ({})", index.name());

        let generator: Arc<dyn AnswerProvider> =
            Arc::new(OpenAiGenerator::new(&config.generation)?);
        tracing::info!(
            "Answer provider initialized ({}, model {})",
            generator.name(),
            generator.model()
        );

        let tracker = Arc::new(IngestionTracker::new(
            config.tracker.max_entries,
            config.tracker.ttl_secs,
        ));

        let ingestion = IngestionPipeline::new(
            Arc::clone(&embedder),
            Arc::clone(&index),
            Arc::clone(&tracker),
        );
        let answer = AnswerPipeline::new(embedder, Arc::clone(&index), generator);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                tracker,
                index,
                ingestion,
                answer,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the progress tracker
    pub fn tracker(&self) -> &IngestionTracker {
        &self.inner.tracker
    }

    /// Get the vector index
    pub fn index(&self) -> &Arc<dyn VectorIndex> {
        &self.inner.index
    }

    /// Get the ingestion pipeline
    pub fn ingestion(&self) -> &IngestionPipeline {
        &self.inner.ingestion
    }

    /// Get the answer pipeline
    pub fn answer_pipeline(&self) -> &AnswerPipeline {
        &self.inner.answer
    }
}
