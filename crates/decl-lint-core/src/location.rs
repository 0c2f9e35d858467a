//! Byte offset to line/column resolution and per-line token classes.

use crate::syntax::{SyntaxToken, TokenClass};
use crate::types::Position;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Token classifications recorded for each 1-based line.
pub type LineClassificationMap = BTreeMap<usize, BTreeSet<TokenClass>>;

/// Resolves byte offsets against one file's source text.
///
/// Built once per file and read-only afterwards, so a single resolver can be
/// shared by every rule evaluating that file.
#[derive(Debug, Clone)]
pub struct LocationResolver<'a> {
    contents: &'a str,
    /// Byte offset at which each line starts; `line_starts[0] == 0`.
    line_starts: Vec<usize>,
    classifications: LineClassificationMap,
}

impl<'a> LocationResolver<'a> {
    /// Indexes `contents` and records which token classes touch each line.
    #[must_use]
    pub fn new(contents: &'a str, tokens: &[SyntaxToken]) -> Self {
        let line_starts = std::iter::once(0)
            .chain(contents.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        let mut resolver = Self {
            contents,
            line_starts,
            classifications: LineClassificationMap::new(),
        };

        for token in tokens {
            resolver.record_token(token);
        }

        resolver
    }

    fn record_token(&mut self, token: &SyntaxToken) {
        let last_byte = token.offset.checked_add(token.length.saturating_sub(1));
        let (Some(first), Some(last)) = (
            self.line_of(token.offset),
            last_byte.and_then(|end| self.line_of(end.min(self.contents.len()))),
        ) else {
            debug!(
                "Dropping token {:?} at byte {} outside source text",
                token.kind, token.offset
            );
            return;
        };

        for line in first..=last {
            self.classifications
                .entry(line)
                .or_default()
                .insert(token.kind);
        }
    }

    /// Returns the 1-based line containing `offset`, if it is within the text.
    fn line_of(&self, offset: usize) -> Option<usize> {
        if offset > self.contents.len() {
            return None;
        }
        // Number of line starts at or before `offset` is the 1-based line.
        Some(self.line_starts.partition_point(|&start| start <= offset))
    }

    /// Converts a byte offset into a 1-based line and character column.
    ///
    /// Returns `None` if `offset` lies past the end of the text or inside a
    /// multi-byte character. The end-of-text offset itself is valid.
    #[must_use]
    pub fn resolve(&self, offset: usize) -> Option<Position> {
        let line = self.line_of(offset)?;
        let line_start = self.line_starts[line - 1];
        let prefix = self.contents.get(line_start..offset)?;
        Some(Position::new(line, prefix.chars().count() + 1))
    }

    /// Returns every token class whose span intersects `line`.
    #[must_use]
    pub fn classifications(&self, line: usize) -> Option<&BTreeSet<TokenClass>> {
        self.classifications.get(&line)
    }

    /// Returns the full per-line classification map.
    #[must_use]
    pub fn classification_map(&self) -> &LineClassificationMap {
        &self.classifications
    }
}
