//! Recall and progress endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use verse_core::repository::require_verse;
use verse_core::Outcome;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/recall
pub async fn recall(
    State(state): State<AppState>,
    Json(payload): Json<RecallRequest>,
) -> Result<Json<RecallResponse>> {
    match state.session.recall(&payload.verse_id, &payload.input)? {
        Outcome::Graded(score) => Ok(Json(RecallResponse {
            verse_id: payload.verse_id,
            score,
        })),
        Outcome::Incomplete => Err(ApiError::IncompleteAnswer(
            "recite the verse before submitting".to_string(),
        )),
    }
}

/// GET /api/progress
pub async fn list(State(state): State<AppState>) -> Json<ProgressResponse> {
    let tracker = state.tracker.read().await;
    Json(ProgressResponse {
        records: tracker.records().cloned().collect(),
        summary: tracker.summary(state.session.verses().len()),
    })
}

/// GET /api/progress/:id
pub async fn get(
    State(state): State<AppState>,
    Path(verse_id): Path<String>,
) -> Result<Json<MasteryRecord>> {
    let verse = require_verse(state.session.verses(), &verse_id)?;
    let tracker = state.tracker.read().await;
    let record = tracker
        .get(&verse.id)
        .cloned()
        .unwrap_or_else(|| MasteryRecord::new(verse.id));
    Ok(Json(record))
}
