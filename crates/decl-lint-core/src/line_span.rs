//! Line spans of declaration bodies and comment-aware line counting.
//!
//! Counting convention: the raw length of a span is `end - start`, and the
//! comment-only lines subtracted from it are counted over the inclusive range
//! `[start, end]`. The result saturates at zero.

use crate::location::{LineClassificationMap, LocationResolver};

/// An inclusive range of 1-based lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// First line of the span.
    pub start: usize,
    /// Last line of the span.
    pub end: usize,
}

impl LineSpan {
    /// Creates a span; `end` is clamped so the span is never inverted.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Resolves the lines of a body given as a byte offset and length.
    ///
    /// Returns `None` if either end of the body lies outside the source text.
    #[must_use]
    pub fn of_body(resolver: &LocationResolver<'_>, offset: usize, length: usize) -> Option<Self> {
        let start = resolver.resolve(offset)?;
        let end = resolver.resolve(offset.checked_add(length)?)?;
        Some(Self::new(start.line, end.line))
    }

    /// Difference between the last and first line.
    #[must_use]
    pub const fn raw_len(&self) -> usize {
        self.end - self.start
    }

    /// Counts lines in `[start, end]` that contain only comment tokens.
    ///
    /// Lines with no recorded tokens (blank lines) are not comment-only.
    #[must_use]
    pub fn comment_only_lines(&self, map: &LineClassificationMap) -> usize {
        map.range(self.start..=self.end)
            .filter(|(_, classes)| !classes.is_empty() && classes.iter().all(|c| c.is_comment()))
            .count()
    }
}

/// Returns the line count of `span`, optionally excluding comment-only lines.
#[must_use]
pub fn effective_line_count(
    span: LineSpan,
    map: &LineClassificationMap,
    exclude_comments: bool,
) -> usize {
    if exclude_comments {
        span.raw_len().saturating_sub(span.comment_only_lines(map))
    } else {
        span.raw_len()
    }
}

/// Checks whether the comment-excluding line count of `span` exceeds `limit`.
///
/// Returns the decision and the count it was based on. When the raw length is
/// already within `limit` the comment scan is skipped and the raw length is
/// returned; excluding comments could only lower it further.
#[must_use]
pub fn exceeds_excluding_comments(
    span: LineSpan,
    map: &LineClassificationMap,
    limit: usize,
) -> (bool, usize) {
    if span.raw_len() <= limit {
        return (false, span.raw_len());
    }
    let count = effective_line_count(span, map, true);
    (count > limit, count)
}
