//! Hints for learners who are stuck.

use crate::types::VerseRecord;

/// Default number of leading words left visible by the word game.
pub const DEFAULT_REVEALED_WORDS: usize = 3;

/// Mask every word after the first `revealed` ones, keeping its first letter.
///
/// `hint("Je puis tout", 1)` gives `"Je p___ t___"`.
pub fn hint(text: &str, revealed: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if revealed >= words.len() {
        return text.to_string();
    }

    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i < revealed {
                word.to_string()
            } else {
                mask_word(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Theme clue shown instead of revealing words.
pub fn theme_hint(verse: &VerseRecord) -> String {
    let theme = verse.theme.trim();
    if theme.is_empty() {
        format!("This verse comes from {}", verse.reference)
    } else {
        format!("This verse is about \"{theme}\"")
    }
}

fn mask_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => std::iter::once(first)
            .chain(chars.map(|_| '_'))
            .collect(),
        None => String::new(),
    }
}
