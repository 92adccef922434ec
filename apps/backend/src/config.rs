//! Service configuration from environment variables.

use std::path::PathBuf;

use anyhow::Context;
use verse_core::catalog::default_verses;
use verse_core::hint::DEFAULT_REVEALED_WORDS;
use verse_core::{GradingSettings, VerseRecord};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Optional verse content file; the built-in catalog is used otherwise.
    pub verses_path: Option<PathBuf>,
    pub hint_revealed_words: usize,
    pub grading: GradingSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            verses_path: None,
            hint_revealed_words: DEFAULT_REVEALED_WORDS,
            grading: GradingSettings::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("PORT must be a port number, got {port:?}"))?;
        }
        if let Some(path) = lookup("VERSES_PATH").filter(|p| !p.trim().is_empty()) {
            config.verses_path = Some(PathBuf::from(path));
        }
        if let Some(words) = lookup("HINT_REVEALED_WORDS") {
            config.hint_revealed_words = words
                .parse()
                .with_context(|| format!("HINT_REVEALED_WORDS must be a count, got {words:?}"))?;
        }
        if let Some(json) = lookup("GRADING_SETTINGS") {
            config.grading = serde_json::from_str(&json)
                .context("GRADING_SETTINGS must be a JSON object of grading thresholds")?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load verses from the content file, or fall back to the built-in catalog.
    pub fn load_verses(&self) -> anyhow::Result<Vec<VerseRecord>> {
        let Some(path) = &self.verses_path else {
            tracing::info!("Using built-in verse catalog");
            return Ok(default_verses());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let verses = verse_core::parse(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        tracing::info!(path = %path.display(), count = verses.len(), "Loaded verses");
        Ok(verses)
    }
}
