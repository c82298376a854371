use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("Failed to load tokenizer {identity}: {source}")]
    Load {
        identity: String,
        #[source]
        source: tokenizers::Error,
    },

    #[error("Failed to encode text: {0}")]
    Encode(#[source] tokenizers::Error),
}

impl From<TokenizerError> for detox_core::Error {
    fn from(err: TokenizerError) -> Self {
        detox_core::Error::Tokenizer(Box::new(err))
    }
}
