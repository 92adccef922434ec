//! Recall session: wires verse lookup, grading and progression together.
//!
//! The session itself keeps no attempt state. Each exercise is handed back to
//! the caller and graded from what the caller sends in, so any number of
//! attempts can be graded concurrently.

use chrono::Utc;
use rand::Rng;

use crate::error::Result;
use crate::exercise::generate_exercise_with;
use crate::grading::Grader;
use crate::progress::{AttemptKind, AttemptRecord, ProgressionSink, MASTERY_ACCURACY};
use crate::repository::{require_verse, sample_verse, VerseRepository};
use crate::types::{Difficulty, Exercise, ExerciseMode, GradingResult, GradingSettings, Outcome};

pub struct RecallSession<R, S> {
    verses: R,
    sink: S,
    grader: Grader,
}

impl<R, S> RecallSession<R, S>
where
    R: VerseRepository,
    S: ProgressionSink,
{
    pub fn new(verses: R, sink: S, settings: GradingSettings) -> Result<Self> {
        Ok(Self {
            verses,
            sink,
            grader: Grader::new(settings)?,
        })
    }

    pub fn verses(&self) -> &R {
        &self.verses
    }

    pub fn grader(&self) -> &Grader {
        &self.grader
    }

    /// Present a fresh exercise for a known verse.
    pub fn start<G: Rng + ?Sized>(
        &self,
        verse_id: &str,
        mode: ExerciseMode,
        rng: &mut G,
    ) -> Result<Exercise> {
        let verse = require_verse(&self.verses, verse_id)?;
        let exercise = generate_exercise_with(
            &verse,
            mode,
            self.grader.settings().blank_fraction,
            rng,
        )?;
        tracing::debug!(
            verse_id,
            mode = mode.as_str(),
            exercise_id = %exercise.id,
            "exercise presented"
        );
        Ok(exercise)
    }

    /// Present a fresh exercise for a random verse matching the filter.
    pub fn start_random<G: Rng + ?Sized>(
        &self,
        category: Option<&str>,
        difficulty: Option<Difficulty>,
        mode: ExerciseMode,
        rng: &mut G,
    ) -> Result<Exercise> {
        let verse = sample_verse(&self.verses, category, difficulty, rng)?;
        self.start(&verse.id, mode, rng)
    }

    /// Grade a submission; passed rounds are forwarded to the sink.
    ///
    /// The exercise comes back from the client, so its verse must still exist.
    pub fn submit(&self, exercise: &Exercise, raw_input: &str) -> Result<Outcome<GradingResult>> {
        require_verse(&self.verses, &exercise.verse_id)?;
        let outcome = self.grader.grade(&exercise.spec, raw_input)?;

        match outcome {
            Outcome::Graded(result) => {
                tracing::info!(
                    verse_id = %exercise.verse_id,
                    exercise_id = %exercise.id,
                    mode = exercise.spec.mode().as_str(),
                    score = result.score,
                    passed = result.passed,
                    "submission graded"
                );
                if result.passed {
                    self.forward(&exercise.verse_id, result.score, true, AttemptKind::Round);
                }
            }
            Outcome::Incomplete => {
                tracing::debug!(exercise_id = %exercise.id, "incomplete submission");
            }
        }

        Ok(outcome)
    }

    /// Continuous-score attempt for the memorization tracker.
    ///
    /// Every graded attempt is forwarded, whatever the score.
    pub fn recall(&self, verse_id: &str, raw_input: &str) -> Result<Outcome<u8>> {
        let verse = require_verse(&self.verses, verse_id)?;
        let outcome = self.grader.measure_recall(&verse.text, raw_input)?;

        if let Outcome::Graded(score) = outcome {
            tracing::info!(verse_id, score, "recall measured");
            let passed = score >= MASTERY_ACCURACY;
            self.forward(verse_id, score, passed, AttemptKind::Recall);
        }

        Ok(outcome)
    }

    fn forward(&self, verse_id: &str, score: u8, passed: bool, kind: AttemptKind) {
        let attempt = AttemptRecord {
            verse_id: verse_id.to_string(),
            score,
            passed,
            kind,
            recorded_at: Utc::now(),
        };
        if let Err(err) = self.sink.record_attempt(attempt) {
            tracing::warn!(verse_id, error = %err, "failed to record attempt; grade unaffected");
        }
    }
}
