//! Offset alignment - maps sub-word tokens back onto their source text
//!
//! CRITICAL: the cleaned dataset is rebuilt from these spans. A wrong offset
//! or a dropped gap corrupts the output silently, so every span is checked
//! before anything is rebuilt.
//!
//! Spans are byte offsets into the UTF-8 text. Gaps are counted in
//! characters and re-emitted as that many spaces.

use crate::error::AlignmentError;
use serde::Serialize;

/// Half-open byte range `[start, end)` into the original text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

/// A token paired with the slice of text it was produced from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedToken<'a> {
    pub token: &'a str,
    pub source: &'a str,
    pub span: Span,
    /// Characters skipped between the previous span and this one.
    /// Always 0 for the first token.
    pub gap: usize,
}

/// Tokens of one text, in order, with their source slices and gaps
#[derive(Debug, Clone, Default)]
pub struct Alignment<'a> {
    tokens: Vec<AlignedToken<'a>>,
}

impl<'a> Alignment<'a> {
    pub fn tokens(&self) -> &[AlignedToken<'a>] {
        &self.tokens
    }

    /// Rebuild a string by interleaving gaps (as spaces) with `replace(token)`.
    ///
    /// No space is emitted before the first token, whatever its span start.
    pub fn rebuild<F, R>(&self, mut replace: F) -> String
    where
        F: FnMut(&AlignedToken<'a>) -> R,
        R: AsRef<str>,
    {
        let capacity = self.tokens.iter().map(|t| t.gap + t.source.len()).sum();
        let mut out = String::with_capacity(capacity);

        for aligned in &self.tokens {
            out.extend(std::iter::repeat_n(' ', aligned.gap));
            out.push_str(replace(aligned).as_ref());
        }

        out
    }
}

/// Drop the leading and trailing boundary spans (e.g. `[CLS]` / `[SEP]`).
pub fn trim_boundaries(offsets: &[Span]) -> Result<&[Span], AlignmentError> {
    match offsets.len() {
        n @ (0 | 1) => Err(AlignmentError::MissingBoundaries(n)),
        n => Ok(&offsets[1..n - 1]),
    }
}

/// Pair each token with its span in `text`.
///
/// Requires exactly one span per token. Spans must lie inside `text`, on
/// character boundaries, and must not overlap their predecessor.
pub fn align<'a, S>(
    text: &'a str,
    tokens: &'a [S],
    spans: &[Span],
) -> Result<Alignment<'a>, AlignmentError>
where
    S: AsRef<str>,
{
    if tokens.len() != spans.len() {
        return Err(AlignmentError::LengthMismatch {
            tokens: tokens.len(),
            spans: spans.len(),
        });
    }

    let mut aligned = Vec::with_capacity(tokens.len());
    let mut previous_end: Option<usize> = None;

    for (index, (token, &span)) in tokens.iter().zip(spans).enumerate() {
        check_span(text, index, span)?;

        let gap = match previous_end {
            None => 0,
            Some(end) if span.start < end => {
                return Err(AlignmentError::Overlap {
                    index,
                    start: span.start,
                    previous_end: end,
                });
            }
            Some(end) => text[end..span.start].chars().count(),
        };

        aligned.push(AlignedToken {
            token: token.as_ref(),
            source: &text[span.start..span.end],
            span,
            gap,
        });
        previous_end = Some(span.end);
    }

    Ok(Alignment { tokens: aligned })
}

fn check_span(text: &str, index: usize, span: Span) -> Result<(), AlignmentError> {
    let Span { start, end } = span;

    if end < start {
        return Err(AlignmentError::Inverted { index, start, end });
    }
    if end > text.len() {
        return Err(AlignmentError::OutOfBounds {
            index,
            start,
            end,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        return Err(AlignmentError::NotCharBoundary { index, start, end });
    }

    Ok(())
}
