//! Core types for verse recall.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, VerseError};
use crate::normalize::{Normalizer, DEFAULT_COMPOUNDS};

/// Verse difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[serde(alias = "facile")]
    Easy,
    #[serde(alias = "moyen")]
    Medium,
    #[serde(alias = "difficile")]
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl Difficulty {
    /// Get the difficulty name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse from string, accepting the French content labels too.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "facile" => Some(Self::Easy),
            "medium" | "moyen" => Some(Self::Medium),
            "hard" | "difficile" => Some(Self::Hard),
            _ => None,
        }
    }

    /// Points awarded for a passed game round at this level.
    pub fn round_points(self) -> u32 {
        match self {
            Self::Easy => 10,
            Self::Medium => 20,
            Self::Hard => 30,
        }
    }
}

/// A scripture passage. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub id: String,
    pub reference: String,
    pub text: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// Exercise variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseMode {
    FillBlank,
    WordOrder,
    FreeRecall,
}

impl ExerciseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FillBlank => "fill_blank",
            Self::WordOrder => "word_order",
            Self::FreeRecall => "free_recall",
        }
    }
}

/// Payload presented to the learner for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExerciseSpec {
    FillBlank {
        masked_text: String,
        blanks: Vec<String>,
    },
    WordOrder {
        scrambled_tokens: Vec<String>,
        expected_tokens: Vec<String>,
    },
    FreeRecall {
        expected_text: String,
    },
}

impl ExerciseSpec {
    pub fn mode(&self) -> ExerciseMode {
        match self {
            Self::FillBlank { .. } => ExerciseMode::FillBlank,
            Self::WordOrder { .. } => ExerciseMode::WordOrder,
            Self::FreeRecall { .. } => ExerciseMode::FreeRecall,
        }
    }
}

/// One generated attempt: the payload plus the verse it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub verse_id: String,
    pub spec: ExerciseSpec,
}

/// Grade for a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    /// 0 to 100.
    pub score: u8,
    pub passed: bool,
}

impl GradingResult {
    /// Build from a ratio in `[0, 1]`, rounding half up.
    pub fn from_ratio(ratio: f64, passed: bool) -> Self {
        Self {
            score: ratio_to_score(ratio),
            passed,
        }
    }

    pub fn failed() -> Self {
        Self {
            score: 0,
            passed: false,
        }
    }
}

/// Convert a `[0, 1]` ratio into an integer percentage.
pub fn ratio_to_score(ratio: f64) -> u8 {
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Result of a submission: either graded, or rejected as incomplete.
///
/// An incomplete submission never carries a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum Outcome<T> {
    Graded(T),
    Incomplete,
}

impl<T> Outcome<T> {
    pub fn graded(self) -> Option<T> {
        match self {
            Self::Graded(value) => Some(value),
            Self::Incomplete => None,
        }
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete)
    }
}

/// Grading and generation thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingSettings {
    /// Share of words blanked in fill-blank exercises, in `(0, 1]`.
    pub blank_fraction: f64,
    /// Per-word similarity needed for a fill-blank answer to count.
    pub fill_blank_word_threshold: f64,
    /// Alignment ratio needed to pass a fill-blank exercise.
    pub fill_blank_pass_ratio: f64,
    /// Whole-text similarity needed to pass word-order and free recall.
    pub text_pass_similarity: f64,
    /// Per-word similarity used by the word-alignment fallback.
    pub recall_word_threshold: f64,
    /// Alignment ratio needed by the word-alignment fallback.
    pub recall_pass_ratio: f64,
    /// Hyphen-compounds expanded during normalization.
    pub compounds: Vec<String>,
}

impl Default for GradingSettings {
    fn default() -> Self {
        Self {
            blank_fraction: 0.25,
            fill_blank_word_threshold: 0.7,
            fill_blank_pass_ratio: 0.7,
            text_pass_similarity: 0.30,
            recall_word_threshold: 0.3,
            recall_pass_ratio: 0.40,
            compounds: DEFAULT_COMPOUNDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl GradingSettings {
    /// Reject thresholds outside `[0, 1]` and blank fractions outside `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !(self.blank_fraction > 0.0 && self.blank_fraction <= 1.0) {
            return Err(VerseError::InvalidSettings(format!(
                "blank_fraction must be in (0, 1], got {}",
                self.blank_fraction
            )));
        }

        let thresholds = [
            ("fill_blank_word_threshold", self.fill_blank_word_threshold),
            ("fill_blank_pass_ratio", self.fill_blank_pass_ratio),
            ("text_pass_similarity", self.text_pass_similarity),
            ("recall_word_threshold", self.recall_word_threshold),
            ("recall_pass_ratio", self.recall_pass_ratio),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(VerseError::InvalidSettings(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(&self.compounds)
    }
}
