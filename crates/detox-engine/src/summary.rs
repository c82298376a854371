use detox_core::{ClassFilter, Record, Strategy};
use serde::Serialize;

/// Result of sanitizing one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Sanitized { record: Record, replaced: usize },
    /// Skipped by the class filter, emitted verbatim
    PassedThrough(Record),
}

impl Outcome {
    pub fn record(&self) -> &Record {
        match self {
            Outcome::Sanitized { record, .. } | Outcome::PassedThrough(record) => record,
        }
    }

    pub fn into_record(self) -> Record {
        match self {
            Outcome::Sanitized { record, .. } | Outcome::PassedThrough(record) => record,
        }
    }
}

/// Counters for one run over a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub strategy: Strategy,
    pub class_filter: ClassFilter,
    pub records: usize,
    pub sanitized: usize,
    pub passed_through: usize,
    pub tokens_replaced: usize,
    /// BLAKE3 hex digest of the bytes written
    pub output_digest: String,
}

impl RunSummary {
    pub fn new(strategy: Strategy, class_filter: ClassFilter) -> Self {
        Self {
            strategy,
            class_filter,
            records: 0,
            sanitized: 0,
            passed_through: 0,
            tokens_replaced: 0,
            output_digest: String::new(),
        }
    }

    pub fn record(&mut self, outcome: &Outcome) {
        self.records += 1;
        match outcome {
            Outcome::Sanitized { replaced, .. } => {
                self.sanitized += 1;
                self.tokens_replaced += replaced;
            }
            Outcome::PassedThrough(_) => self.passed_through += 1,
        }
    }
}
