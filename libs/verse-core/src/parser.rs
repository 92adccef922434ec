//! Parser for verse content files.
//!
//! # Format
//! ```markdown
//! # Confiance
//!
//! ID: ps-23-1
//! REF: Psaume 23:1
//! THEME: Confiance
//! LEVEL: facile
//! TEXT: L'Éternel est mon berger:
//! je ne manquerai de rien.
//! ```
//!
//! `TEXT` may span several lines until the next blank line or field. Lines
//! starting with `#` are headings and are skipped.

use std::collections::HashSet;

use crate::error::ParseError;
use crate::types::{Difficulty, VerseRecord};

/// Parse content into verse records.
pub fn parse(content: &str) -> Result<Vec<VerseRecord>, ParseError> {
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut parser = Parser::new();
    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }
    parser.finalize()
}

struct VerseBuilder {
    id: String,
    reference: Option<String>,
    theme: Option<String>,
    difficulty: Option<Difficulty>,
    text: Vec<String>,
    start_line: usize,
}

impl VerseBuilder {
    fn new(id: String, start_line: usize) -> Self {
        Self {
            id,
            reference: None,
            theme: None,
            difficulty: None,
            text: Vec::new(),
            start_line,
        }
    }

    fn build(self) -> Result<VerseRecord, ParseError> {
        let reference = self.reference.ok_or_else(|| ParseError::MissingReference {
            id: self.id.clone(),
            line: self.start_line,
        })?;

        let text = self.text.join(" ");
        if text.trim().is_empty() {
            return Err(ParseError::MissingText {
                id: self.id,
                line: self.start_line,
            });
        }

        Ok(VerseRecord {
            id: self.id,
            reference,
            text,
            theme: self.theme.unwrap_or_default(),
            difficulty: self.difficulty.unwrap_or_default(),
        })
    }
}

struct Parser {
    current: Option<VerseBuilder>,
    in_text: bool,
    verses: Vec<VerseRecord>,
    seen_ids: HashSet<String>,
}

impl Parser {
    fn new() -> Self {
        Self {
            current: None,
            in_text: false,
            verses: Vec::new(),
            seen_ids: HashSet::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<(), ParseError> {
        match Self::parse_line(line) {
            LineType::Id(id) => self.handle_id(id, line_num)?,
            LineType::Reference(text) => {
                self.current_mut(line_num)?.reference = Some(text.to_string())
            }
            LineType::Theme(text) => self.current_mut(line_num)?.theme = Some(text.to_string()),
            LineType::Level(value) => {
                let difficulty =
                    Difficulty::from_str(value).ok_or_else(|| ParseError::UnknownLevel {
                        line: line_num,
                        value: value.to_string(),
                    })?;
                self.current_mut(line_num)?.difficulty = Some(difficulty);
            }
            LineType::Text(text) => {
                let current = self.current_mut(line_num)?;
                current.text.clear();
                if !text.is_empty() {
                    current.text.push(text.to_string());
                }
                self.in_text = true;
                return Ok(());
            }
            LineType::Continuation(text) => {
                if self.in_text {
                    if let Some(ref mut verse) = self.current {
                        verse.text.push(text.trim().to_string());
                    }
                    return Ok(());
                }
            }
            LineType::Heading | LineType::Empty => {}
        }
        self.in_text = false;
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("ID:") {
            LineType::Id(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("REF:") {
            LineType::Reference(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("THEME:") {
            LineType::Theme(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("LEVEL:") {
            LineType::Level(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("TEXT:") {
            LineType::Text(rest.trim())
        } else if trimmed.starts_with('#') {
            LineType::Heading
        } else if trimmed.is_empty() {
            LineType::Empty
        } else {
            LineType::Continuation(line)
        }
    }

    fn current_mut(&mut self, line_num: usize) -> Result<&mut VerseBuilder, ParseError> {
        self.current
            .as_mut()
            .ok_or(ParseError::MissingId { line: line_num })
    }

    fn handle_id(&mut self, id: &str, line_num: usize) -> Result<(), ParseError> {
        self.flush()?;

        if id.is_empty() {
            return Err(ParseError::MissingId { line: line_num });
        }
        if !self.seen_ids.insert(id.to_string()) {
            return Err(ParseError::DuplicateId {
                id: id.to_string(),
                line: line_num,
            });
        }

        self.current = Some(VerseBuilder::new(id.to_string(), line_num));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ParseError> {
        if let Some(verse) = self.current.take() {
            self.verses.push(verse.build()?);
        }
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<VerseRecord>, ParseError> {
        self.flush()?;
        Ok(self.verses)
    }
}

enum LineType<'a> {
    Id(&'a str),
    Reference(&'a str),
    Theme(&'a str),
    Level(&'a str),
    Text(&'a str),
    Continuation(&'a str),
    Heading,
    Empty,
}
