use std::fs;
use std::path::Path;

use crate::error::{GhostError, Result};

/// Non-empty list of candidate words for test sentences
#[derive(Debug, Clone, PartialEq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// One word per line; lines are trimmed and blanks dropped
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_words(text.lines().map(str::to_string).collect())
    }

    /// Words are trimmed and blanks dropped; nothing left is an error
    pub fn from_words(words: Vec<String>) -> Result<Self> {
        let words: Vec<String> = words
            .into_iter()
            .map(|word| word.trim().to_string())
            .filter(|word| !word.is_empty())
            .collect();
        if words.is_empty() {
            return Err(GhostError::EmptyWordList);
        }
        Ok(Self { words })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// The compiled-in english list
    pub fn embedded() -> Result<Self> {
        let text = crate::DATA_DIR
            .get_file("words.txt")
            .and_then(|file| file.contents_utf8())
            .unwrap_or_default();
        Self::parse(text)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
