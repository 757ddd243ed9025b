//! Question answering endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{query::Query, response::AnswerResponse};

/// POST /qa - Answer a question with retrieval-augmented generation
pub async fn answer_question(
    State(state): State<AppState>,
    Json(query): Json<Query>,
) -> Result<Json<AnswerResponse>> {
    let response = state.answer_pipeline().answer(&query).await?;
    Ok(Json(response))
}
