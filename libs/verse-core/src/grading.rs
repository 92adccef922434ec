//! Grading engine.
//!
//! Grading is a pure function of the exercise and the raw answer. Blank
//! answers are reported as [`Outcome::Incomplete`] and never receive a score.

use std::sync::LazyLock;

use crate::error::{Result, VerseError};
use crate::normalize::Normalizer;
use crate::similarity::{alignment_ratio, normalized_similarity, text_similarity};
use crate::types::{ratio_to_score, ExerciseSpec, GradingResult, GradingSettings, Outcome};

static DEFAULT_GRADER: LazyLock<Grader> = LazyLock::new(Grader::default);

/// Grade with default thresholds.
pub fn grade(spec: &ExerciseSpec, raw_input: &str) -> Result<Outcome<GradingResult>> {
    DEFAULT_GRADER.grade(spec, raw_input)
}

/// Continuous accuracy with default settings.
pub fn measure_recall(expected_text: &str, raw_input: &str) -> Result<Outcome<u8>> {
    DEFAULT_GRADER.measure_recall(expected_text, raw_input)
}

/// Stateless grader holding validated thresholds.
#[derive(Debug, Clone)]
pub struct Grader {
    settings: GradingSettings,
    normalizer: Normalizer,
}

impl Default for Grader {
    fn default() -> Self {
        let settings = GradingSettings::default();
        let normalizer = settings.normalizer();
        Self {
            settings,
            normalizer,
        }
    }
}

impl Grader {
    pub fn new(settings: GradingSettings) -> Result<Self> {
        settings.validate()?;
        let normalizer = settings.normalizer();
        Ok(Self {
            settings,
            normalizer,
        })
    }

    pub fn settings(&self) -> &GradingSettings {
        &self.settings
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Grade one submission against an exercise.
    pub fn grade(&self, spec: &ExerciseSpec, raw_input: &str) -> Result<Outcome<GradingResult>> {
        self.check_spec(spec)?;

        if is_blank(raw_input) {
            return Ok(Outcome::Incomplete);
        }

        let result = match spec {
            ExerciseSpec::FillBlank { blanks, .. } => self.grade_fill_blank(blanks, raw_input),
            ExerciseSpec::WordOrder {
                expected_tokens, ..
            } => self.grade_recall(&expected_tokens.join(" "), raw_input),
            ExerciseSpec::FreeRecall { expected_text } => {
                self.grade_recall(expected_text, raw_input)
            }
        };

        Ok(Outcome::Graded(result))
    }

    /// Accuracy percentage for the long-term memorization tracker.
    ///
    /// No pass/fail gate: mastery is decided over several attempts.
    pub fn measure_recall(&self, expected_text: &str, raw_input: &str) -> Result<Outcome<u8>> {
        if self.normalizer.normalize(expected_text).is_empty() {
            return Err(VerseError::InvalidExercise(
                "expected text is empty".to_string(),
            ));
        }
        if is_blank(raw_input) {
            return Ok(Outcome::Incomplete);
        }

        let similarity = text_similarity(&self.normalizer, raw_input, expected_text);
        Ok(Outcome::Graded(ratio_to_score(similarity)))
    }

    fn check_spec(&self, spec: &ExerciseSpec) -> Result<()> {
        match spec {
            ExerciseSpec::FillBlank { blanks, .. } => {
                if blanks.is_empty() {
                    return Err(VerseError::InvalidExercise(
                        "fill-blank exercise has no blanks".to_string(),
                    ));
                }
            }
            ExerciseSpec::WordOrder {
                scrambled_tokens,
                expected_tokens,
            } => {
                if expected_tokens.is_empty() {
                    return Err(VerseError::InvalidExercise(
                        "word-order exercise has no tokens".to_string(),
                    ));
                }
                if scrambled_tokens.len() != expected_tokens.len() {
                    return Err(VerseError::InvalidExercise(format!(
                        "word-order exercise has {} scrambled tokens for {} expected",
                        scrambled_tokens.len(),
                        expected_tokens.len()
                    )));
                }
            }
            ExerciseSpec::FreeRecall { expected_text } => {
                if self.normalizer.normalize(expected_text).is_empty() {
                    return Err(VerseError::InvalidExercise(
                        "free-recall exercise has no text".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    fn grade_fill_blank(&self, blanks: &[String], raw_input: &str) -> GradingResult {
        let answers: Vec<&str> = raw_input.split_whitespace().collect();
        if answers.len() != blanks.len() {
            return GradingResult::failed();
        }

        let ratio = alignment_ratio(
            &self.normalizer,
            &answers,
            blanks,
            self.settings.fill_blank_word_threshold,
        );
        GradingResult::from_ratio(ratio, ratio >= self.settings.fill_blank_pass_ratio)
    }

    /// Escalating tolerance: exact, then edit distance, then word alignment.
    fn grade_recall(&self, expected_text: &str, raw_input: &str) -> GradingResult {
        let input = self.normalizer.normalize(raw_input);
        let expected = self.normalizer.normalize(expected_text);

        if input == expected {
            return GradingResult {
                score: 100,
                passed: true,
            };
        }

        let similarity = normalized_similarity(&input, &expected);
        if similarity >= self.settings.text_pass_similarity {
            return GradingResult::from_ratio(similarity, true);
        }

        let input_words: Vec<&str> = input.split_whitespace().collect();
        let expected_words: Vec<&str> = expected.split_whitespace().collect();
        let ratio = alignment_ratio(
            &self.normalizer,
            &input_words,
            &expected_words,
            self.settings.recall_word_threshold,
        );
        if ratio >= self.settings.recall_pass_ratio {
            return GradingResult::from_ratio(ratio, true);
        }

        GradingResult::from_ratio(similarity.max(ratio), false)
    }
}

fn is_blank(raw_input: &str) -> bool {
    raw_input.trim().is_empty()
}
