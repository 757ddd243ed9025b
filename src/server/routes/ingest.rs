//! Document ingestion and progress endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::Result;
use crate::progress::ProgressRecord;
use crate::server::state::AppState;
use crate::types::{document::Document, response::IngestResponse};

/// POST /ingest - Accept a document for asynchronous ingestion
pub async fn ingest_document(
    State(state): State<AppState>,
    Json(document): Json<Document>,
) -> (StatusCode, Json<IngestResponse>) {
    let task_id = state.ingestion().ingest(document);

    (
        StatusCode::ACCEPTED,
        Json(IngestResponse {
            message: "Document ingestion started. You will receive progress updates.".to_string(),
            task_id,
        }),
    )
}

/// GET /ingestion-progress/:task_id - Current progress of an ingestion task
pub async fn ingestion_progress(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<ProgressRecord>> {
    let record = state.tracker().get(&task_id)?;
    Ok(Json(record))
}
