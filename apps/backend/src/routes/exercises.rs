//! Exercise endpoints
//!
//! Exercises are handed to the client and sent back with the answer, so no
//! attempt state lives on the server.

use axum::{extract::State, Json};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use verse_core::repository::require_verse;
use verse_core::Outcome;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/exercises
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateExerciseRequest>,
) -> Result<Json<Exercise>> {
    let mut rng = match payload.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let exercise = match payload.verse_id.as_deref() {
        Some(verse_id) => state.session.start(verse_id, payload.mode, &mut rng)?,
        None => state.session.start_random(
            payload.category.as_deref(),
            payload.difficulty,
            payload.mode,
            &mut rng,
        )?,
    };

    Ok(Json(exercise))
}

/// POST /api/exercises/grade
pub async fn grade(
    State(state): State<AppState>,
    Json(payload): Json<GradeRequest>,
) -> Result<Json<GradeResponse>> {
    let exercise = payload.exercise;

    let result = match state.session.submit(&exercise, &payload.input)? {
        Outcome::Graded(result) => result,
        Outcome::Incomplete => {
            return Err(ApiError::IncompleteAnswer(
                "submit an answer before grading".to_string(),
            ))
        }
    };

    let (tally, round) = match payload.tally {
        Some(mut tally) => {
            let verse = require_verse(state.session.verses(), &exercise.verse_id)?;
            let round = tally.record(verse.difficulty, result.passed);
            if round.milestone {
                tracing::info!(streak = tally.streak, "streak milestone reached");
            }
            (Some(tally), Some(round))
        }
        None => (None, None),
    };

    Ok(Json(GradeResponse {
        exercise_id: exercise.id,
        verse_id: exercise.verse_id,
        result,
        tally,
        round,
    }))
}
