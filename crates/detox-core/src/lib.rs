//! Core domain models and logic for detox
//!
//! This crate contains:
//! - Offset alignment between sub-word tokens and source text
//! - Dataset records (label, text) and their TSV line codec
//! - Run policies (strategy, class filter, match target)

pub mod align;
pub mod error;
pub mod policy;
pub mod record;

pub use align::{AlignedToken, Alignment, Span, align, trim_boundaries};
pub use error::{AlignmentError, ConfigError, Error, Result};
pub use policy::{ClassFilter, MatchTarget, Strategy};
pub use record::Record;
