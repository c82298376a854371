pub mod output;
pub mod summary;

use detox_core::{Alignment, ClassFilter, Record, Result, Span, align, trim_boundaries};
use detox_security::Rewriter;
use detox_tokens::SubwordTokenizer;
use serde::Serialize;
use std::io::{BufRead, Write};

pub use output::DatasetWriter;
pub use summary::{Outcome, RunSummary};

/// Cleaned text of one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedText {
    pub text: String,
    pub replaced: usize,
}

/// One token as shown by `preview`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewToken {
    pub token: String,
    pub source: String,
    pub span: Span,
    pub gap: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub tokens: Vec<PreviewToken>,
    pub cleaned: String,
}

/// Runs the tokenize → align → rewrite pipeline over dataset records.
///
/// Owns the tokenizer and the rewriter (with its denylist) for one run.
/// Neither is mutated once the run starts.
pub struct Sanitizer<T> {
    tokenizer: T,
    rewriter: Rewriter,
    class_filter: ClassFilter,
}

impl<T: SubwordTokenizer> Sanitizer<T> {
    pub fn new(tokenizer: T, rewriter: Rewriter, class_filter: ClassFilter) -> Self {
        Self {
            tokenizer,
            rewriter,
            class_filter,
        }
    }

    pub fn rewriter(&self) -> &Rewriter {
        &self.rewriter
    }

    pub fn class_filter(&self) -> ClassFilter {
        self.class_filter
    }

    /// Sanitize one record, or pass it through if the class filter skips it
    pub fn sanitize(&self, record: &Record) -> Result<Outcome> {
        if !self.class_filter.should_sanitize(record) {
            return Ok(Outcome::PassedThrough(record.clone()));
        }

        let cleaned = self.clean_text(&record.text)?;
        Ok(Outcome::Sanitized {
            record: record.with_text(cleaned.text),
            replaced: cleaned.replaced,
        })
    }

    /// Rewrite artifact tokens in `text`, keeping inter-token spacing
    pub fn clean_text(&self, text: &str) -> Result<CleanedText> {
        self.with_alignment(text, |alignment| {
            let mut replaced = 0;
            let text = alignment.rebuild(|aligned| {
                let rewrite = self.rewriter.rewrite_aligned(aligned);
                if rewrite.is_replaced() {
                    replaced += 1;
                }
                rewrite
            });
            CleanedText { text, replaced }
        })
    }

    /// Per-token breakdown of how `text` would be cleaned
    pub fn preview(&self, text: &str) -> Result<Preview> {
        self.with_alignment(text, |alignment| {
            let tokens = alignment
                .tokens()
                .iter()
                .map(|aligned| {
                    let rewrite = self.rewriter.rewrite_aligned(aligned);
                    PreviewToken {
                        token: aligned.token.to_string(),
                        source: aligned.source.to_string(),
                        span: aligned.span,
                        gap: aligned.gap,
                        replacement: rewrite
                            .is_replaced()
                            .then(|| rewrite.as_str().to_string()),
                    }
                })
                .collect();
            let cleaned = alignment.rebuild(|aligned| self.rewriter.rewrite_aligned(aligned));
            Preview { tokens, cleaned }
        })
    }

    fn with_alignment<F, O>(&self, text: &str, f: F) -> Result<O>
    where
        F: FnOnce(&Alignment<'_>) -> O,
    {
        let tokens = self.tokenizer.tokenize(text)?;
        let offsets = self.tokenizer.offsets(text)?;
        let spans = trim_boundaries(&offsets)?;
        let alignment = align(text, &tokens, spans)?;
        Ok(f(&alignment))
    }

    /// Stream `input` to `output`, one line in, one line out.
    ///
    /// Stops at the first error. Lines already written are flushed before
    /// the error is returned.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<RunSummary> {
        let mut writer = DatasetWriter::new(output);
        let mut summary = RunSummary::new(self.rewriter.strategy(), self.class_filter);

        for (index, line) in input.lines().enumerate() {
            let line_number = index + 1;
            let line = line?;

            let record = Record::parse(&line, line_number)?;
            let outcome = self.sanitize(&record).inspect_err(|err| {
                tracing::error!(line = line_number, error = %err, "Failed to sanitize record");
            })?;
            tracing::trace!(line = line_number, ?outcome, "Processed record");

            summary.record(&outcome);
            writer.write_record(outcome.record())?;
        }

        summary.output_digest = writer.finish()?;
        tracing::info!(
            records = summary.records,
            sanitized = summary.sanitized,
            passed_through = summary.passed_through,
            tokens_replaced = summary.tokens_replaced,
            "Run complete"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use detox_core::{AlignmentError, Error, Strategy};
    use detox_security::ArtifactDenylist;
    use detox_tokens::WhitespaceTokenizer;

    /// Returns the same tokens and offsets for any text
    struct ScriptedTokenizer {
        tokens: Vec<String>,
        offsets: Vec<Span>,
    }

    impl ScriptedTokenizer {
        fn foobar() -> Self {
            Self {
                tokens: vec!["foo".into(), "##bar".into(), "baz".into()],
                offsets: vec![
                    Span::new(0, 0),
                    Span::new(0, 3),
                    Span::new(3, 6),
                    Span::new(7, 10),
                    Span::new(0, 0),
                ],
            }
        }
    }

    impl SubwordTokenizer for ScriptedTokenizer {
        fn tokenize(&self, _text: &str) -> detox_tokens::Result<Vec<String>> {
            Ok(self.tokens.clone())
        }

        fn offsets(&self, _text: &str) -> detox_tokens::Result<Vec<Span>> {
            Ok(self.offsets.clone())
        }

        fn extend_vocabulary(&mut self, _entries: &[String]) -> detox_tokens::Result<usize> {
            Ok(0)
        }
    }

    fn rewriter(strategy: Strategy, entries: &[&str]) -> Rewriter {
        Rewriter::new(ArtifactDenylist::new(entries.iter().copied()), strategy)
            .with_placeholder("[X]")
    }

    #[test]
    fn test_mask_subword_piece() {
        let sanitizer = Sanitizer::new(
            ScriptedTokenizer::foobar(),
            rewriter(Strategy::Mask, &["##bar"]),
            ClassFilter::All,
        );

        let cleaned = sanitizer.clean_text("foobar baz").unwrap();

        assert_eq!(cleaned.text, "foo[X] baz");
        assert_eq!(cleaned.replaced, 1);
    }

    #[test]
    fn test_delete_subword_piece() {
        let sanitizer = Sanitizer::new(
            ScriptedTokenizer::foobar(),
            rewriter(Strategy::Delete, &["##bar"]),
            ClassFilter::All,
        );

        let cleaned = sanitizer.clean_text("foobar baz").unwrap();

        assert_eq!(cleaned.text, "foo  baz");
    }

    #[test]
    fn test_no_artifacts_is_identity() {
        let sanitizer = Sanitizer::new(
            ScriptedTokenizer::foobar(),
            rewriter(Strategy::Delete, &[]),
            ClassFilter::All,
        );

        let cleaned = sanitizer.clean_text("foobar baz").unwrap();

        assert_eq!(cleaned.text, "foobar baz");
        assert_eq!(cleaned.replaced, 0);
    }

    #[test]
    fn test_alignment_mismatch() {
        let tokenizer = ScriptedTokenizer {
            tokens: ["a", "b", "c", "d", "e"].map(String::from).to_vec(),
            offsets: vec![
                Span::new(0, 0),
                Span::new(0, 1),
                Span::new(2, 3),
                Span::new(4, 5),
                Span::new(6, 7),
                Span::new(0, 0),
            ],
        };
        let sanitizer = Sanitizer::new(tokenizer, rewriter(Strategy::Mask, &[]), ClassFilter::All);

        let err = sanitizer.clean_text("a b c d e").unwrap_err();

        assert!(matches!(
            err,
            Error::Alignment(AlignmentError::LengthMismatch { tokens: 5, spans: 4 })
        ));
    }

    #[test]
    fn test_hateful_only_passthrough() {
        let sanitizer = Sanitizer::new(
            ScriptedTokenizer::foobar(),
            rewriter(Strategy::Mask, &["##bar"]),
            ClassFilter::HatefulOnly,
        );
        let neutral = Record::new("0", "foobar baz");
        let hateful = Record::new("1", "foobar baz");

        assert_eq!(
            sanitizer.sanitize(&neutral).unwrap(),
            Outcome::PassedThrough(neutral.clone())
        );
        assert_eq!(
            sanitizer.sanitize(&hateful).unwrap().into_record(),
            Record::new("1", "foo[X] baz")
        );
    }

    #[test]
    fn test_empty_text() {
        let sanitizer = Sanitizer::new(
            WhitespaceTokenizer::new(),
            rewriter(Strategy::Mask, &["x"]),
            ClassFilter::All,
        );

        assert_eq!(sanitizer.clean_text("").unwrap().text, "");
    }

    #[test]
    fn test_preview() {
        let sanitizer = Sanitizer::new(
            ScriptedTokenizer::foobar(),
            rewriter(Strategy::Mask, &["##bar"]),
            ClassFilter::All,
        );

        let preview = sanitizer.preview("foobar baz").unwrap();

        assert_eq!(preview.cleaned, "foo[X] baz");
        assert_eq!(preview.tokens.len(), 3);
        assert_eq!(preview.tokens[1].source, "bar");
        assert_eq!(preview.tokens[1].replacement.as_deref(), Some("[X]"));
        assert_eq!(preview.tokens[2].gap, 1);
        assert_eq!(preview.tokens[2].replacement, None);
    }

    #[test]
    fn test_run_preserves_order_and_count() {
        let sanitizer = Sanitizer::new(
            WhitespaceTokenizer::new(),
            rewriter(Strategy::Mask, &["bad"]),
            ClassFilter::HatefulOnly,
        );
        let input = "1\tyou are bad\n0\tbad  day\n1\tall good\n";
        let mut output = Vec::new();

        let summary = sanitizer.run(input.as_bytes(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "1\tyou are [X]\n0\tbad  day\n1\tall good\n"
        );
        assert_eq!(summary.records, 3);
        assert_eq!(summary.sanitized, 2);
        assert_eq!(summary.passed_through, 1);
        assert_eq!(summary.tokens_replaced, 1);
        assert_eq!(summary.output_digest.len(), 64);
    }

    #[test]
    fn test_run_flushes_before_error() {
        let sanitizer = Sanitizer::new(
            WhitespaceTokenizer::new(),
            rewriter(Strategy::Delete, &[]),
            ClassFilter::All,
        );
        let input = "1\tfirst line\nmissing separator\n1\tnever written\n";
        let mut output = Vec::new();

        let err = sanitizer.run(input.as_bytes(), &mut output).unwrap_err();

        assert!(matches!(err, Error::MalformedRecord { line: 2, .. }));
        assert_eq!(String::from_utf8(output).unwrap(), "1\tfirst line\n");
    }
}
