//! API routes for the QA server

pub mod documents;
pub mod ingest;
pub mod qa;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Ingestion with progress polling
        .route("/ingest", post(ingest::ingest_document))
        .route(
            "/ingestion-progress/:task_id",
            get(ingest::ingestion_progress),
        )
        // Question answering
        .route("/qa", post(qa::answer_question))
        // Index statistics
        .route("/documents", get(documents::index_stats))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "corpus-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document Q&A over external embedding, index, and generation providers",
        "models": {
            "embedding": state.config().embedding.model,
            "generation": state.config().generation.model,
        },
        "endpoints": {
            "POST /ingest": "Submit a document for asynchronous ingestion",
            "GET /ingestion-progress/:task_id": "Poll ingestion progress",
            "POST /qa": "Ask a question against the ingested documents",
            "GET /documents": "Vector index statistics",
        }
    }))
}
