//! Run policies, resolved once before any record is read

use crate::error::ConfigError;
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reserved placeholder used by the mask strategy (an unused BERT vocabulary slot)
pub const DEFAULT_MASK_PLACEHOLDER: &str = "[unused0]";

/// What to put in place of an artifact token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Replace with a single space, so neighbouring pieces never fuse into a new word
    Delete,
    /// Replace with the configured placeholder
    Mask,
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delete" | "del" => Ok(Strategy::Delete),
            "mask" => Ok(Strategy::Mask),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Delete => write!(f, "delete"),
            Strategy::Mask => write!(f, "mask"),
        }
    }
}

/// Which records are sanitized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassFilter {
    All,
    /// Only records of the target class; the rest are copied verbatim
    HatefulOnly,
}

impl ClassFilter {
    pub fn should_sanitize(&self, record: &Record) -> bool {
        match self {
            ClassFilter::All => true,
            ClassFilter::HatefulOnly => !record.is_non_target(),
        }
    }
}

impl FromStr for ClassFilter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ClassFilter::All),
            "hateful" | "hateful-only" | "hateful_only" => Ok(ClassFilter::HatefulOnly),
            other => Err(ConfigError::UnknownClassFilter(other.to_string())),
        }
    }
}

impl fmt::Display for ClassFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassFilter::All => write!(f, "all"),
            ClassFilter::HatefulOnly => write!(f, "hateful"),
        }
    }
}

/// Which string is looked up in the artifact denylist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTarget {
    /// The tokenizer's token text, e.g. `##bar`
    #[default]
    Token,
    /// The slice of original text the token was produced from, e.g. `bar`
    Source,
}

impl FromStr for MatchTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "token" => Ok(MatchTarget::Token),
            "source" => Ok(MatchTarget::Source),
            other => Err(ConfigError::UnknownMatchTarget(other.to_string())),
        }
    }
}

impl fmt::Display for MatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchTarget::Token => write!(f, "token"),
            MatchTarget::Source => write!(f, "source"),
        }
    }
}
