//! Text normalization for tolerant verse comparison.
//!
//! The pipeline runs in a fixed order:
//! 1. Lowercase
//! 2. Unify apostrophe and double-quote variants
//! 3. Expand known hyphen-compounds (`tout-puissant` -> `tout puissant`)
//! 4. Strip diacritics and expand ligatures
//! 5. Replace punctuation and symbols with spaces
//! 6. Collapse whitespace (including NBSP and Unicode separators) and trim
//!
//! Every step is total, so `normalize` never fails and is idempotent.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Hyphen-compounds expanded by the default normalizer.
pub const DEFAULT_COMPOUNDS: &[&str] = &[
    "tout-puissant",
    "très-haut",
    "saint-esprit",
    "peut-être",
    "c'est-à-dire",
];

const CANONICAL_APOSTROPHE: char = '\'';
const CANONICAL_QUOTE: char = '"';

static DEFAULT_NORMALIZER: LazyLock<Normalizer> = LazyLock::new(Normalizer::default);

/// Normalize with the default compound list.
pub fn normalize(raw: &str) -> String {
    DEFAULT_NORMALIZER.normalize(raw)
}

/// Shared default normalizer.
pub fn default_normalizer() -> &'static Normalizer {
    &DEFAULT_NORMALIZER
}

/// Configurable normalizer. Only the compound list varies between instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Normalizer {
    /// (compound, expansion) pairs, both already lowercased and quote-unified.
    compounds: Vec<(String, String)>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_COMPOUNDS.iter().copied())
    }
}

impl Normalizer {
    /// Build a normalizer from hyphenated compounds such as `"Tout-Puissant"`.
    pub fn new<I, S>(compounds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let compounds = compounds
            .into_iter()
            .map(|c| unify_quotes(&c.as_ref().trim().to_lowercase()))
            .filter(|c| c.contains('-'))
            .map(|c| {
                let expanded = c.replace('-', " ");
                (c, expanded)
            })
            .collect();
        Self { compounds }
    }

    /// The hyphenated forms this normalizer expands.
    pub fn compounds(&self) -> impl Iterator<Item = &str> {
        self.compounds.iter().map(|(c, _)| c.as_str())
    }

    /// Canonicalize `raw` for comparison.
    pub fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let mut text = unify_quotes(&raw.to_lowercase());

        for (compound, expanded) in &self.compounds {
            if text.contains(compound.as_str()) {
                text = text.replace(compound.as_str(), expanded);
            }
        }

        let stripped = strip_diacritics(&text);

        let spaced: String = stripped
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        spaced.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

fn unify_quotes(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '\u{201B}' | '\u{02BC}' | '\u{00B4}' | '`' | '\u{2032}' => {
                CANONICAL_APOSTROPHE
            }
            '\u{201C}' | '\u{201D}' | '\u{201F}' | '\u{00AB}' | '\u{00BB}' | '\u{201E}'
            | '\u{2033}' => CANONICAL_QUOTE,
            other => other,
        })
        .collect()
}

fn strip_diacritics(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => out.push('a'),
            'è' | 'é' | 'ê' | 'ë' => out.push('e'),
            'ì' | 'í' | 'î' | 'ï' => out.push('i'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => out.push('o'),
            'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
            'ý' | 'ÿ' => out.push('y'),
            'ç' => out.push('c'),
            'ñ' => out.push('n'),
            'ß' => out.push_str("ss"),
            'œ' => out.push_str("oe"),
            'æ' => out.push_str("ae"),
            other => out.push(other),
        }
    }
    // Anything outside the table still loses its combining marks.
    out.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
