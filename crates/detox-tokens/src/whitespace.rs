//! Whitespace tokenizer - one token per whitespace-separated word
//!
//! Needs no model files. Reserved vocabulary is recorded but never changes
//! how text splits, since every word is already a single token.

use crate::{Result, SubwordTokenizer};
use detox_core::Span;
use std::collections::HashSet;

/// Identity used to select this tokenizer from configuration
pub const WHITESPACE_TOKENIZER: &str = "whitespace";

#[derive(Debug, Clone, Default)]
pub struct WhitespaceTokenizer {
    reserved: HashSet<String>,
}

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserved_len(&self) -> usize {
        self.reserved.len()
    }

    fn words(text: &str) -> impl Iterator<Item = Span> + '_ {
        text.char_indices()
            .filter(|(_, c)| !c.is_whitespace())
            .filter(move |&(i, _)| {
                text[..i]
                    .chars()
                    .next_back()
                    .is_none_or(char::is_whitespace)
            })
            .map(move |(start, _)| {
                let end = text[start..]
                    .find(char::is_whitespace)
                    .map_or(text.len(), |len| start + len);
                Span::new(start, end)
            })
    }
}

impl SubwordTokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(Self::words(text)
            .map(|span| text[span.start..span.end].to_string())
            .collect())
    }

    fn offsets(&self, text: &str) -> Result<Vec<Span>> {
        let boundary = Span::new(0, 0);
        let mut offsets = vec![boundary];
        offsets.extend(Self::words(text));
        offsets.push(boundary);
        Ok(offsets)
    }

    fn extend_vocabulary(&mut self, entries: &[String]) -> Result<usize> {
        let before = self.reserved.len();
        self.reserved.extend(entries.iter().cloned());
        Ok(self.reserved.len() - before)
    }
}
