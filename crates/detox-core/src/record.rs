//! Dataset records and the `label<TAB>text` line format

use crate::error::{Error, Result};
use std::fmt;

pub const FIELD_SEPARATOR: char = '\t';

/// Label of the non-target (non-hateful) class
pub const NON_TARGET_LABEL: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub label: String,
    pub text: String,
}

impl Record {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Parse one input line. `line_number` is 1-based and only used for errors.
    ///
    /// Trailing whitespace is stripped from the text. Fields after the text
    /// are ignored. An empty text field is valid.
    pub fn parse(line: &str, line_number: usize) -> Result<Self> {
        let (label, rest) = line
            .split_once(FIELD_SEPARATOR)
            .ok_or_else(|| Error::MalformedRecord {
                line: line_number,
                reason: "missing tab between label and text".to_string(),
            })?;

        let mut fields = rest.split(FIELD_SEPARATOR);
        let text = fields.next().unwrap_or_default().trim_end();

        let extra = fields.filter(|field| !field.trim().is_empty()).count();
        if extra > 0 {
            tracing::warn!(line = line_number, extra, "Ignoring extra fields after text");
        }

        Ok(Self::new(label, text))
    }

    pub fn is_non_target(&self) -> bool {
        self.label == NON_TARGET_LABEL
    }

    pub fn with_text(&self, text: String) -> Self {
        Self {
            label: self.label.clone(),
            text,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.label, FIELD_SEPARATOR, self.text)
    }
}
