//! Response types for the HTTP API

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response returned when a document is accepted for ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub message: String,
    pub task_id: Uuid,
}

/// Answer plus the retrieved context it was conditioned on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// Generated answer text
    pub answer: String,
    /// Retrieved passages, ranked by descending similarity
    pub context: Vec<String>,
}
