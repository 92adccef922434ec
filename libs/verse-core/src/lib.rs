//! Core verse-memorization library used by the backend service.
//!
//! Provides:
//! - Text normalization and similarity measures (edit distance, word alignment)
//! - Exercise generation (fill-blank, word-order, free-recall)
//! - Tolerant grading with configurable thresholds
//! - Hints, progression tracking and game-round tallies
//! - Verse content parser and the built-in verse catalog

pub mod catalog;
pub mod error;
pub mod exercise;
pub mod grading;
pub mod hint;
pub mod normalize;
pub mod parser;
pub mod progress;
pub mod repository;
pub mod session;
pub mod similarity;
pub mod types;

pub use error::{ParseError, Result, SinkError, VerseError};
pub use exercise::generate_exercise;
pub use grading::{grade, measure_recall, Grader};
pub use hint::{hint, theme_hint};
pub use normalize::{normalize, Normalizer};
pub use parser::parse;
pub use progress::{
    AttemptKind, AttemptRecord, MasteryRecord, ProgressSummary, ProgressTracker,
    ProgressionSink, RoundTally, RoundUpdate,
};
pub use repository::{InMemoryVerses, VerseRepository};
pub use session::RecallSession;
pub use similarity::{sim_text, sim_word};
pub use types::{
    Difficulty, Exercise, ExerciseMode, ExerciseSpec, GradingResult, GradingSettings, Outcome,
    VerseRecord,
};
