//! Error types for verse-core.

use thiserror::Error;

/// Result type alias using VerseError.
pub type Result<T> = std::result::Result<T, VerseError>;

/// Structural failures raised by exercise generation, grading and lookup.
///
/// These are never turned into a grade: callers must surface them as-is.
#[derive(Debug, Error, PartialEq)]
pub enum VerseError {
    #[error("verse not found: {0}")]
    VerseNotFound(String),

    #[error("no verse matches the requested filter")]
    NoMatchingVerse,

    #[error("verse {0} has no words to build an exercise from")]
    EmptyVerse(String),

    #[error("invalid exercise: {0}")]
    InvalidExercise(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Errors that can occur while parsing a verse content file.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("missing id for verse starting at line {line}")]
    MissingId { line: usize },

    #[error("missing reference for verse {id} at line {line}")]
    MissingReference { id: String, line: usize },

    #[error("missing text for verse {id} at line {line}")]
    MissingText { id: String, line: usize },

    #[error("unknown level at line {line}: {value}")]
    UnknownLevel { line: usize, value: String },

    #[error("duplicate ID {id} at line {line}")]
    DuplicateId { id: String, line: usize },
}

/// Failure reported by a progression sink. Always swallowed by the session.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("progress store unavailable: {0}")]
    Unavailable(String),

    #[error("progress write rejected: {0}")]
    Rejected(String),
}
