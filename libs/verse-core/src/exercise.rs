//! Exercise generation from a verse.
//!
//! Every generator takes the caller's RNG so that a seeded generator
//! reproduces the same exercise.

use rand::seq::{index, SliceRandom};
use rand::Rng;
use uuid::Builder;

use crate::error::{Result, VerseError};
use crate::normalize::normalize;
use crate::types::{Exercise, ExerciseMode, ExerciseSpec, VerseRecord};

/// Placeholder shown in place of a blanked word.
pub const BLANK_PLACEHOLDER: &str = "____";

/// Default share of words blanked in fill-blank exercises.
pub const DEFAULT_BLANK_FRACTION: f64 = 0.25;

const MAX_SHUFFLE_DRAWS: usize = 8;

/// Generate an exercise with the default blank fraction.
pub fn generate_exercise<R: Rng + ?Sized>(
    verse: &VerseRecord,
    mode: ExerciseMode,
    rng: &mut R,
) -> Result<Exercise> {
    generate_exercise_with(verse, mode, DEFAULT_BLANK_FRACTION, rng)
}

/// Generate an exercise, blanking `blank_fraction` of the words in fill-blank mode.
pub fn generate_exercise_with<R: Rng + ?Sized>(
    verse: &VerseRecord,
    mode: ExerciseMode,
    blank_fraction: f64,
    rng: &mut R,
) -> Result<Exercise> {
    let spec = match mode {
        ExerciseMode::FillBlank => fill_blank(verse, blank_fraction, rng)?,
        ExerciseMode::WordOrder => word_order(verse, rng)?,
        ExerciseMode::FreeRecall => free_recall(verse)?,
    };

    Ok(Exercise {
        id: Builder::from_random_bytes(rng.gen()).into_uuid(),
        verse_id: verse.id.clone(),
        spec,
    })
}

/// Blank `max(1, ceil(words * blank_fraction))` distinct words.
///
/// Only tokens holding at least one letter or digit can be blanked, so a
/// stray `:` or `—` never becomes an answer.
pub fn fill_blank<R: Rng + ?Sized>(
    verse: &VerseRecord,
    blank_fraction: f64,
    rng: &mut R,
) -> Result<ExerciseSpec> {
    if !(blank_fraction > 0.0 && blank_fraction <= 1.0) {
        return Err(VerseError::InvalidSettings(format!(
            "blank_fraction must be in (0, 1], got {blank_fraction}"
        )));
    }

    let tokens: Vec<&str> = verse.text.split_whitespace().collect();
    let eligible: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.chars().any(char::is_alphanumeric))
        .map(|(i, _)| i)
        .collect();

    if eligible.is_empty() {
        return Err(VerseError::EmptyVerse(verse.id.clone()));
    }

    let count = blank_count(eligible.len(), blank_fraction);
    let mut chosen: Vec<usize> = index::sample(rng, eligible.len(), count)
        .into_iter()
        .map(|i| eligible[i])
        .collect();
    chosen.sort_unstable();

    let masked_text = tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            if chosen.binary_search(&i).is_ok() {
                BLANK_PLACEHOLDER
            } else {
                *token
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let blanks = chosen
        .iter()
        .map(|&i| strip_punctuation(tokens[i]).to_string())
        .collect();

    Ok(ExerciseSpec::FillBlank {
        masked_text,
        blanks,
    })
}

/// Shuffle the verse's words. A fresh permutation is drawn on every call.
pub fn word_order<R: Rng + ?Sized>(verse: &VerseRecord, rng: &mut R) -> Result<ExerciseSpec> {
    let expected_tokens = word_tokens(&verse.text);
    if expected_tokens.is_empty() {
        return Err(VerseError::EmptyVerse(verse.id.clone()));
    }

    let mut scrambled_tokens = expected_tokens.clone();
    scrambled_tokens.shuffle(rng);

    // Avoid handing out an already-solved puzzle when another order exists.
    let reorderable = expected_tokens.iter().any(|t| t != &expected_tokens[0]);
    let mut draws = 1;
    while reorderable && scrambled_tokens == expected_tokens && draws < MAX_SHUFFLE_DRAWS {
        scrambled_tokens.shuffle(rng);
        draws += 1;
    }

    Ok(ExerciseSpec::WordOrder {
        scrambled_tokens,
        expected_tokens,
    })
}

/// The verse text as-is; comparison happens after normalization at grading time.
pub fn free_recall(verse: &VerseRecord) -> Result<ExerciseSpec> {
    if normalize(&verse.text).is_empty() {
        return Err(VerseError::EmptyVerse(verse.id.clone()));
    }
    Ok(ExerciseSpec::FreeRecall {
        expected_text: verse.text.clone(),
    })
}

/// Whitespace tokens with edge punctuation removed; empty tokens dropped.
pub fn word_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(strip_punctuation)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim leading and trailing punctuation, keeping inner apostrophes and hyphens.
pub fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

fn blank_count(eligible: usize, blank_fraction: f64) -> usize {
    // Tolerance keeps 0.3 * 10 from rounding up to 4.
    let raw = (eligible as f64 * blank_fraction - 1e-9).ceil() as usize;
    raw.clamp(1, eligible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    use crate::types::Difficulty;

    fn verse(text: &str) -> VerseRecord {
        VerseRecord {
            id: "test".to_string(),
            reference: "Test 1:1".to_string(),
            text: text.to_string(),
            theme: "test".to_string(),
            difficulty: Difficulty::Easy,
        }
    }

    fn refill(masked_text: &str, blanks: &[String]) -> String {
        let mut blanks = blanks.iter();
        masked_text
            .split(' ')
            .map(|token| {
                if token == BLANK_PLACEHOLDER {
                    blanks.next().map(String::as_str).unwrap_or(token)
                } else {
                    token
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn counts(tokens: &[String]) -> HashMap<&str, usize> {
        let mut map = HashMap::new();
        for token in tokens {
            *map.entry(token.as_str()).or_insert(0) += 1;
        }
        map
    }

    const PSALM: &str = "L'Éternel est mon berger: je ne manquerai de rien.";

    #[test]
    fn blank_count_rounds_up() {
        assert_eq!(blank_count(9, 0.25), 3);
        assert_eq!(blank_count(8, 0.25), 2);
        assert_eq!(blank_count(10, 0.3), 3);
        assert_eq!(blank_count(1, 0.25), 1);
        assert_eq!(blank_count(3, 1.0), 3);
    }

    #[test]
    fn fill_blank_round_trip() {
        let verse = verse(PSALM);
        let word_count = PSALM.split_whitespace().count();

        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let spec = fill_blank(&verse, 0.25, &mut rng).unwrap();
            let ExerciseSpec::FillBlank { masked_text, blanks } = spec else {
                panic!("expected fill-blank spec");
            };

            assert!(!blanks.is_empty() && blanks.len() <= word_count);
            assert_eq!(blanks.len(), 3);
            assert_eq!(
                masked_text.matches(BLANK_PLACEHOLDER).count(),
                blanks.len()
            );
            assert_eq!(normalize(&refill(&masked_text, &blanks)), normalize(PSALM));
        }
    }

    #[test]
    fn fill_blank_strips_edge_punctuation() {
        let verse = verse("rien.");
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let spec = fill_blank(&verse, 0.25, &mut rng).unwrap();
        assert_eq!(
            spec,
            ExerciseSpec::FillBlank {
                masked_text: BLANK_PLACEHOLDER.to_string(),
                blanks: vec!["rien".to_string()],
            }
        );
    }

    #[test]
    fn fill_blank_never_blanks_bare_punctuation() {
        let verse = verse("Paix : joie");
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let ExerciseSpec::FillBlank { blanks, .. } =
                fill_blank(&verse, 1.0, &mut rng).unwrap()
            else {
                panic!("expected fill-blank spec");
            };
            assert_eq!(blanks, vec!["Paix".to_string(), "joie".to_string()]);
        }
    }

    #[test]
    fn fill_blank_rejects_bad_fraction() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = fill_blank(&verse(PSALM), 0.0, &mut rng);
        assert!(matches!(result, Err(VerseError::InvalidSettings(_))));
        let result = fill_blank(&verse(PSALM), 1.5, &mut rng);
        assert!(matches!(result, Err(VerseError::InvalidSettings(_))));
    }

    #[test]
    fn word_order_preserves_multiset() {
        let verse = verse("Je puis tout par celui qui me fortifie.");
        for seed in 0..30 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let ExerciseSpec::WordOrder {
                scrambled_tokens,
                expected_tokens,
            } = word_order(&verse, &mut rng).unwrap()
            else {
                panic!("expected word-order spec");
            };

            assert_eq!(
                expected_tokens,
                vec!["Je", "puis", "tout", "par", "celui", "qui", "me", "fortifie"]
            );
            assert_eq!(counts(&scrambled_tokens), counts(&expected_tokens));
            assert_ne!(scrambled_tokens, expected_tokens);
        }
    }

    #[test]
    fn word_order_reshuffles_each_call() {
        let verse = verse("Car Dieu a tant aimé le monde qu'il a donné son Fils unique");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let first = word_order(&verse, &mut rng).unwrap();
        let second = word_order(&verse, &mut rng).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn word_order_drops_bare_punctuation() {
        let verse = verse("« Paix » : joie !");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let ExerciseSpec::WordOrder {
            expected_tokens, ..
        } = word_order(&verse, &mut rng).unwrap()
        else {
            panic!("expected word-order spec");
        };
        assert_eq!(expected_tokens, vec!["Paix", "joie"]);
    }

    #[test]
    fn single_word_verse_keeps_its_only_order() {
        let verse = verse("Amen.");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let spec = word_order(&verse, &mut rng).unwrap();
        assert_eq!(
            spec,
            ExerciseSpec::WordOrder {
                scrambled_tokens: vec!["Amen".to_string()],
                expected_tokens: vec!["Amen".to_string()],
            }
        );
    }

    #[test]
    fn free_recall_keeps_text() {
        let spec = free_recall(&verse(PSALM)).unwrap();
        assert_eq!(
            spec,
            ExerciseSpec::FreeRecall {
                expected_text: PSALM.to_string()
            }
        );
    }

    #[test]
    fn empty_verse_is_an_error_in_every_mode() {
        let empty = verse("  ... ! ");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for mode in [
            ExerciseMode::FillBlank,
            ExerciseMode::WordOrder,
            ExerciseMode::FreeRecall,
        ] {
            let result = generate_exercise(&empty, mode, &mut rng);
            assert_eq!(result, Err(VerseError::EmptyVerse("test".to_string())));
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let verse = verse(PSALM);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let a = generate_exercise(&verse, ExerciseMode::FillBlank, &mut rng).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let b = generate_exercise(&verse, ExerciseMode::FillBlank, &mut rng).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.verse_id, "test");
    }
}
