use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Alignment error: {0}")]
    Alignment(#[from] AlignmentError),

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Tokenizer error: {0}")]
    Tokenizer(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid run settings. Always raised before any record is processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("strategy {0:?} does not exist (expected \"delete\" or \"mask\")")]
    UnknownStrategy(String),

    #[error("class filter {0:?} does not exist (expected \"all\" or \"hateful\")")]
    UnknownClassFilter(String),

    #[error("match target {0:?} does not exist (expected \"token\" or \"source\")")]
    UnknownMatchTarget(String),

    #[error("missing required option: {0}")]
    MissingOption(&'static str),
}

/// The tokenizer broke its offset contract for a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("{tokens} tokens but {spans} offset spans")]
    LengthMismatch { tokens: usize, spans: usize },

    #[error("expected leading and trailing boundary spans, got {0} span(s)")]
    MissingBoundaries(usize),

    #[error("span {index} ({start}..{end}) ends before it starts")]
    Inverted { index: usize, start: usize, end: usize },

    #[error("span {index} ({start}..{end}) exceeds text length {len}")]
    OutOfBounds {
        index: usize,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("span {index} ({start}..{end}) splits a UTF-8 character")]
    NotCharBoundary { index: usize, start: usize, end: usize },

    #[error("span {index} starts at {start} before the previous span ends at {previous_end}")]
    Overlap {
        index: usize,
        start: usize,
        previous_end: usize,
    },
}

impl Error {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    pub fn is_alignment(&self) -> bool {
        matches!(self, Error::Alignment(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
