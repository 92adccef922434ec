//! Similarity scoring between recalled and expected text.
//!
//! Two strategies are kept side by side:
//! - [`sim_word`]: character-positional heuristic, tuned for single words
//! - [`sim_text`]: Levenshtein ratio over whole passages
//!
//! Both normalize their inputs first and always return a value in `[0, 1]`.

use crate::normalize::{default_normalizer, Normalizer};

/// Score given to near-miss words (short words with most letters right, or
/// longer words with at least 80% positional agreement).
const NEAR_MISS_SCORE: f64 = 0.9;
const SHORT_WORD_LEN: usize = 3;
const SHORT_WORD_RATIO: f64 = 0.6;
const LONG_WORD_RATIO: f64 = 0.8;

/// Word similarity with the default normalizer.
pub fn sim_word(a: &str, b: &str) -> f64 {
    word_similarity(default_normalizer(), a, b)
}

/// Text similarity with the default normalizer.
pub fn sim_text(a: &str, b: &str) -> f64 {
    text_similarity(default_normalizer(), a, b)
}

/// Character-positional similarity between two words.
///
/// Counts characters equal at the same index, divided by the longer length.
/// Insertions shift every following character, so this is deliberately
/// unforgiving of a missing letter early in the word.
pub fn word_similarity(normalizer: &Normalizer, a: &str, b: &str) -> f64 {
    let a = normalizer.normalize(a);
    let b = normalizer.normalize(b);

    if a.is_empty() || b.is_empty() {
        return if a.is_empty() && b.is_empty() { 1.0 } else { 0.0 };
    }
    if a == b {
        return 1.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let longest = a_chars.len().max(b_chars.len());
    let shortest = a_chars.len().min(b_chars.len());
    let aligned = a_chars
        .iter()
        .zip(b_chars.iter())
        .filter(|(x, y)| x == y)
        .count();

    let ratio = aligned as f64 / longest as f64;

    if shortest <= SHORT_WORD_LEN && ratio >= SHORT_WORD_RATIO {
        ratio.max(NEAR_MISS_SCORE)
    } else if ratio >= LONG_WORD_RATIO {
        ratio.max(NEAR_MISS_SCORE)
    } else {
        ratio
    }
}

/// Edit-distance similarity between two passages.
pub fn text_similarity(normalizer: &Normalizer, a: &str, b: &str) -> f64 {
    let a = normalizer.normalize(a);
    let b = normalizer.normalize(b);

    if a == b {
        return 1.0;
    }
    normalized_similarity(&a, &b)
}

/// Positional word alignment ratio.
///
/// Position `i` counts as a match when `word_similarity(user[i], target[i])`
/// reaches `threshold`; a missing word on either side compares as empty.
/// There is no insertion or deletion recovery.
pub fn alignment_ratio<U, T>(
    normalizer: &Normalizer,
    user: &[U],
    target: &[T],
    threshold: f64,
) -> f64
where
    U: AsRef<str>,
    T: AsRef<str>,
{
    let len = user.len().max(target.len());
    if len == 0 {
        return 1.0;
    }

    let matches = (0..len)
        .filter(|&i| {
            let u = user.get(i).map(AsRef::as_ref).unwrap_or("");
            let t = target.get(i).map(AsRef::as_ref).unwrap_or("");
            word_similarity(normalizer, u, t) >= threshold
        })
        .count();

    matches as f64 / len as f64
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Use two rows instead of full matrix for memory efficiency
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// `(max_len - distance) / max_len` over chars, without normalizing.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(a, b);
    (max_len - distance) as f64 / max_len as f64
}
