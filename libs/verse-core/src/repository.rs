//! Read-only verse lookup.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, VerseError};
use crate::normalize::normalize;
use crate::types::{Difficulty, VerseRecord};

/// Source of verse content. The core never writes through it.
pub trait VerseRepository: Send + Sync {
    fn find(&self, id: &str) -> Option<VerseRecord>;

    /// Verses matching a theme (compared after normalization) and difficulty.
    /// `None` matches everything.
    fn filter(&self, category: Option<&str>, difficulty: Option<Difficulty>) -> Vec<VerseRecord>;
}

/// Look up a verse or fail with `VerseNotFound`.
pub fn require_verse<R: VerseRepository + ?Sized>(repo: &R, id: &str) -> Result<VerseRecord> {
    repo.find(id)
        .ok_or_else(|| VerseError::VerseNotFound(id.to_string()))
}

/// Pick one verse uniformly among those matching the filter.
pub fn sample_verse<V, R>(
    repo: &V,
    category: Option<&str>,
    difficulty: Option<Difficulty>,
    rng: &mut R,
) -> Result<VerseRecord>
where
    V: VerseRepository + ?Sized,
    R: Rng + ?Sized,
{
    repo.filter(category, difficulty)
        .choose(rng)
        .cloned()
        .ok_or(VerseError::NoMatchingVerse)
}

/// Verses held in memory, in load order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVerses {
    verses: Vec<VerseRecord>,
}

impl InMemoryVerses {
    pub fn new(verses: Vec<VerseRecord>) -> Self {
        Self { verses }
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn all(&self) -> &[VerseRecord] {
        &self.verses
    }

    /// Distinct themes in load order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for verse in &self.verses {
            if !verse.theme.is_empty() && !seen.contains(&verse.theme) {
                seen.push(verse.theme.clone());
            }
        }
        seen
    }
}

impl VerseRepository for InMemoryVerses {
    fn find(&self, id: &str) -> Option<VerseRecord> {
        self.verses.iter().find(|v| v.id == id).cloned()
    }

    fn filter(&self, category: Option<&str>, difficulty: Option<Difficulty>) -> Vec<VerseRecord> {
        let category = category.map(normalize);
        self.verses
            .iter()
            .filter(|v| difficulty.map_or(true, |d| v.difficulty == d))
            .filter(|v| {
                category
                    .as_deref()
                    .map_or(true, |c| normalize(&v.theme) == c)
            })
            .cloned()
            .collect()
    }
}
