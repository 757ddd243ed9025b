//! Vector index statistics endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;

/// GET /documents - Index-wide statistics, passed through from the index
pub async fn index_stats(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let stats = state.index().stats().await?;
    Ok(Json(stats))
}
