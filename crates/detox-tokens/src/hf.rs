//! HuggingFace `tokenizers` adapter

use crate::{Result, SubwordTokenizer, TokenizerError};
use detox_core::Span;
use std::path::{Path, PathBuf};
use tokenizers::{AddedToken, Tokenizer};

/// Where to load a tokenizer from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerSource {
    /// A local `tokenizer.json`
    File(PathBuf),
    /// A pretrained identifier on the HuggingFace Hub (e.g. `bert-base-uncased`)
    Pretrained(String),
}

/// Fast tokenizer loaded from a `tokenizer.json` definition
pub struct HfTokenizer {
    inner: Tokenizer,
    identity: String,
}

impl HfTokenizer {
    /// Wrap `inner`, turning off any truncation or padding it was saved with.
    ///
    /// Both would make `tokenize` and `offsets` disagree on long records.
    pub fn new(mut inner: Tokenizer, identity: impl Into<String>) -> Result<Self> {
        let identity = identity.into();
        inner.with_padding(None);
        inner
            .with_truncation(None)
            .map_err(|source| TokenizerError::Load {
                identity: identity.clone(),
                source,
            })?;

        Ok(Self { inner, identity })
    }

    pub fn load(source: &TokenizerSource) -> Result<Self> {
        match source {
            TokenizerSource::File(path) => Self::from_file(path),
            TokenizerSource::Pretrained(identifier) => Self::from_pretrained(identifier),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let identity = path.display().to_string();
        let inner = Tokenizer::from_file(path).map_err(|source| TokenizerError::Load {
            identity: identity.clone(),
            source,
        })?;

        tracing::debug!(tokenizer = %identity, "Loaded tokenizer from file");
        Self::new(inner, identity)
    }

    pub fn from_pretrained(identifier: &str) -> Result<Self> {
        let inner =
            Tokenizer::from_pretrained(identifier, None).map_err(|source| TokenizerError::Load {
                identity: identifier.to_string(),
                source,
            })?;

        tracing::debug!(tokenizer = identifier, "Loaded pretrained tokenizer");
        Self::new(inner, identifier)
    }

    pub fn from_bytes(bytes: impl AsRef<[u8]>, identity: impl Into<String>) -> Result<Self> {
        let identity = identity.into();
        let inner = Tokenizer::from_bytes(bytes).map_err(|source| TokenizerError::Load {
            identity: identity.clone(),
            source,
        })?;
        Self::new(inner, identity)
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }
}

impl SubwordTokenizer for HfTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(TokenizerError::Encode)?;
        Ok(encoding.get_tokens().to_vec())
    }

    fn offsets(&self, text: &str) -> Result<Vec<Span>> {
        let encoding = self
            .inner
            .encode(text, true)
            .map_err(TokenizerError::Encode)?;
        Ok(encoding.get_offsets().iter().copied().map(Span::from).collect())
    }

    fn extend_vocabulary(&mut self, entries: &[String]) -> Result<usize> {
        let tokens: Vec<AddedToken> = entries
            .iter()
            .map(|entry| AddedToken::from(entry.clone(), true))
            .collect();

        Ok(self.inner.add_special_tokens(&tokens))
    }
}
