//! Similarity check, for tuning thresholds against real answers

use axum::{extract::State, Json};
use verse_core::similarity::{text_similarity, word_similarity};

use crate::models::*;
use crate::AppState;

/// POST /api/similarity
pub async fn compare(
    State(state): State<AppState>,
    Json(payload): Json<SimilarityRequest>,
) -> Json<SimilarityResponse> {
    let normalizer = state.session.grader().normalizer();
    Json(SimilarityResponse {
        normalized_a: normalizer.normalize(&payload.a),
        normalized_b: normalizer.normalize(&payload.b),
        word: word_similarity(normalizer, &payload.a, &payload.b),
        text: text_similarity(normalizer, &payload.a, &payload.b),
    })
}
