//! Progression tracking: mastery per verse and game-round tallies.
//!
//! The grading engine never reads any of this. It only feeds scores in
//! through a [`ProgressionSink`].

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SinkError;
use crate::types::Difficulty;

/// Rolling accuracy needed for a verse to count as mastered.
pub const MASTERY_ACCURACY: u8 = 90;
/// Attempts needed before a verse can count as mastered.
pub const MASTERY_MIN_ATTEMPTS: u32 = 3;
/// Consecutive passed rounds that earn the streak milestone.
pub const STREAK_MILESTONE: u32 = 5;

/// Where an attempt came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptKind {
    /// A passed game round (fill-blank, word-order or free-recall exercise).
    Round,
    /// A continuous-score recall attempt from the memorization tracker.
    Recall,
}

/// One graded attempt forwarded to the progression store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub verse_id: String,
    pub score: u8,
    pub passed: bool,
    pub kind: AttemptKind,
    pub recorded_at: DateTime<Utc>,
}

/// Best-effort receiver of graded attempts.
///
/// Implementations must not block; failures are logged by the caller and
/// never change the grade already returned.
pub trait ProgressionSink: Send + Sync {
    fn record_attempt(&self, attempt: AttemptRecord) -> Result<(), SinkError>;
}

impl<S: ProgressionSink + ?Sized> ProgressionSink for Arc<S> {
    fn record_attempt(&self, attempt: AttemptRecord) -> Result<(), SinkError> {
        (**self).record_attempt(attempt)
    }
}

/// Per-verse memorization state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteryRecord {
    pub verse_id: String,
    pub attempts: u32,
    pub rolling_accuracy: u8,
    pub mastered: bool,
    #[serde(default)]
    pub rounds_passed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl MasteryRecord {
    pub fn new(verse_id: impl Into<String>) -> Self {
        Self {
            verse_id: verse_id.into(),
            attempts: 0,
            rolling_accuracy: 0,
            mastered: false,
            rounds_passed: 0,
            last_reviewed: None,
        }
    }

    /// Fold one accuracy score into the rolling average.
    pub fn record(&mut self, score: u8, at: DateTime<Utc>) {
        let score = score.min(100);
        let attempts = self.attempts + 1;
        let total = f64::from(self.rolling_accuracy) * f64::from(self.attempts) + f64::from(score);

        self.rolling_accuracy = (total / f64::from(attempts)).round() as u8;
        self.attempts = attempts;
        self.mastered =
            self.rolling_accuracy >= MASTERY_ACCURACY && self.attempts >= MASTERY_MIN_ATTEMPTS;
        self.last_reviewed = Some(at);
    }

    fn record_round(&mut self, at: DateTime<Utc>) {
        self.rounds_passed += 1;
        self.last_reviewed = Some(at);
    }
}

/// Aggregate view over all tracked verses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub mastered: usize,
    pub average_accuracy: u8,
}

/// In-memory mastery store keyed by verse id.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    records: BTreeMap<String, MasteryRecord>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one attempt. Recall attempts move the rolling accuracy, passed
    /// rounds only bump the round counter.
    pub fn apply(&mut self, attempt: &AttemptRecord) -> &MasteryRecord {
        let record = self
            .records
            .entry(attempt.verse_id.clone())
            .or_insert_with(|| MasteryRecord::new(attempt.verse_id.clone()));

        match attempt.kind {
            AttemptKind::Recall => record.record(attempt.score, attempt.recorded_at),
            AttemptKind::Round if attempt.passed => record.record_round(attempt.recorded_at),
            AttemptKind::Round => {}
        }
        record
    }

    pub fn get(&self, verse_id: &str) -> Option<&MasteryRecord> {
        self.records.get(verse_id)
    }

    pub fn records(&self) -> impl Iterator<Item = &MasteryRecord> {
        self.records.values()
    }

    /// Summary over a catalog of `catalog_size` verses; untracked verses
    /// count as 0% accuracy.
    pub fn summary(&self, catalog_size: usize) -> ProgressSummary {
        let total = catalog_size.max(self.records.len());
        let mastered = self.records.values().filter(|r| r.mastered).count();
        let accuracy_sum: u64 = self
            .records
            .values()
            .map(|r| u64::from(r.rolling_accuracy))
            .sum();
        let average_accuracy = if total == 0 {
            0
        } else {
            (accuracy_sum as f64 / total as f64).round() as u8
        };

        ProgressSummary {
            total,
            mastered,
            average_accuracy,
        }
    }
}

/// Game-round bookkeeping kept by the player's client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTally {
    pub points: u32,
    pub streak: u32,
    pub best_streak: u32,
}

/// What changed after one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundUpdate {
    pub points_awarded: u32,
    /// True on the round that brings the streak to [`STREAK_MILESTONE`].
    pub milestone: bool,
}

impl RoundTally {
    pub fn record(&mut self, difficulty: Difficulty, passed: bool) -> RoundUpdate {
        if !passed {
            self.streak = 0;
            return RoundUpdate {
                points_awarded: 0,
                milestone: false,
            };
        }

        let points_awarded = difficulty.round_points();
        self.points += points_awarded;
        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);

        RoundUpdate {
            points_awarded,
            milestone: self.streak == STREAK_MILESTONE,
        }
    }
}
