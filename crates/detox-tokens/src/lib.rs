//! Sub-word tokenizer capability and its implementations

pub mod error;
pub mod hf;
pub mod vocab;
pub mod whitespace;

use detox_core::Span;

pub use error::TokenizerError;
pub use hf::{HfTokenizer, TokenizerSource};
pub use vocab::{EmojiVocabulary, ReservedVocabulary};
pub use whitespace::WhitespaceTokenizer;

pub type Result<T> = std::result::Result<T, TokenizerError>;

/// What the sanitizer needs from a tokenizer.
///
/// `offsets` must return one span per token from `tokenize`, plus a leading
/// and a trailing boundary span (e.g. `[CLS]` and `[SEP]`).
pub trait SubwordTokenizer {
    /// Tokens of `text`, without boundary tokens
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;

    /// Byte spans of each token in `text`, including the two boundary entries
    fn offsets(&self, text: &str) -> Result<Vec<Span>>;

    /// Register reserved vocabulary. Returns how many entries were new.
    fn extend_vocabulary(&mut self, entries: &[String]) -> Result<usize>;
}

impl<T: SubwordTokenizer + ?Sized> SubwordTokenizer for Box<T> {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        (**self).tokenize(text)
    }

    fn offsets(&self, text: &str) -> Result<Vec<Span>> {
        (**self).offsets(text)
    }

    fn extend_vocabulary(&mut self, entries: &[String]) -> Result<usize> {
        (**self).extend_vocabulary(entries)
    }
}
