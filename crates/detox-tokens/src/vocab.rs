//! Reserved vocabulary registered before any record is tokenized

use crate::{Result, SubwordTokenizer};
use std::collections::BTreeSet;

/// Markers the upstream dataset uses in place of user mentions, links and emails
pub const SPECIAL_TOKENS: [&str; 3] = ["[USER]", "[URL]", "[EMAIL]"];

/// Generic marker standing in for any emoji
pub const EMOJI_PLACEHOLDER: &str = "[EMOJI]";

/// How emoji are represented in the tokenizer vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiVocabulary {
    /// Every known emoji glyph, skin-tone variants included, becomes its own token
    Glyphs,
    /// A single placeholder token
    Placeholder(String),
}

impl EmojiVocabulary {
    pub fn from_flag(add_emojis: bool) -> Self {
        if add_emojis {
            EmojiVocabulary::Glyphs
        } else {
            EmojiVocabulary::Placeholder(EMOJI_PLACEHOLDER.to_string())
        }
    }

    pub fn entries(&self) -> Vec<String> {
        match self {
            EmojiVocabulary::Glyphs => emoji_glyphs(),
            EmojiVocabulary::Placeholder(placeholder) => vec![placeholder.clone()],
        }
    }
}

fn emoji_glyphs() -> Vec<String> {
    let mut glyphs = BTreeSet::new();
    for emoji in emojis::iter() {
        glyphs.insert(emoji.as_str());
        if let Some(tones) = emoji.skin_tones() {
            glyphs.extend(tones.map(|variant| variant.as_str()));
        }
    }
    glyphs.into_iter().map(str::to_string).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedVocabulary {
    special_tokens: Vec<String>,
    emoji: EmojiVocabulary,
}

impl ReservedVocabulary {
    pub fn new(special_tokens: Vec<String>, emoji: EmojiVocabulary) -> Self {
        Self {
            special_tokens,
            emoji,
        }
    }

    pub fn emoji(&self) -> &EmojiVocabulary {
        &self.emoji
    }

    /// Special tokens first, then the emoji entries
    pub fn entries(&self) -> Vec<String> {
        let mut entries = self.special_tokens.clone();
        entries.extend(self.emoji.entries());
        entries
    }

    pub fn register<T: SubwordTokenizer + ?Sized>(&self, tokenizer: &mut T) -> Result<usize> {
        let entries = self.entries();
        let added = tokenizer.extend_vocabulary(&entries)?;
        tracing::info!(
            requested = entries.len(),
            added,
            emoji = self.emoji_mode(),
            "Registered reserved vocabulary"
        );
        Ok(added)
    }

    fn emoji_mode(&self) -> &'static str {
        match self.emoji {
            EmojiVocabulary::Glyphs => "glyphs",
            EmojiVocabulary::Placeholder(_) => "placeholder",
        }
    }
}

impl Default for ReservedVocabulary {
    fn default() -> Self {
        Self::new(
            SPECIAL_TOKENS.iter().map(|s| s.to_string()).collect(),
            EmojiVocabulary::Glyphs,
        )
    }
}
