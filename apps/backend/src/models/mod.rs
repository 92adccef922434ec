//! API request and response types

use serde::{Deserialize, Serialize};

// Re-export shared types from verse-core
pub use verse_core::{
    Difficulty, Exercise, ExerciseMode, GradingResult, MasteryRecord, ProgressSummary,
    RoundTally, RoundUpdate, VerseRecord,
};

// === Verse Types ===

#[derive(Debug, Default, Deserialize)]
pub struct VerseListQuery {
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerseListResponse {
    pub verses: Vec<VerseRecord>,
    pub categories: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HintQuery {
    pub revealed: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HintResponse {
    pub verse_id: String,
    pub revealed: usize,
    pub hint: String,
    pub theme_hint: String,
}

// === Exercise Types ===

/// Either a specific verse, or a random one matching the filter.
#[derive(Debug, Deserialize)]
pub struct CreateExerciseRequest {
    pub verse_id: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub mode: ExerciseMode,
    /// Fixes the random draw, for reproducible exercises.
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    pub exercise: Exercise,
    pub input: String,
    /// Client-held game tally; echoed back updated when present.
    #[serde(default)]
    pub tally: Option<RoundTally>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GradeResponse {
    pub exercise_id: uuid::Uuid,
    pub verse_id: String,
    #[serde(flatten)]
    pub result: GradingResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tally: Option<RoundTally>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<RoundUpdate>,
}

// === Recall & Progress Types ===

#[derive(Debug, Deserialize)]
pub struct RecallRequest {
    pub verse_id: String,
    pub input: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecallResponse {
    pub verse_id: String,
    pub score: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub records: Vec<MasteryRecord>,
    pub summary: ProgressSummary,
}

// === Similarity Types ===

#[derive(Debug, Deserialize)]
pub struct SimilarityRequest {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarityResponse {
    pub normalized_a: String,
    pub normalized_b: String,
    pub word: f64,
    pub text: f64,
}
