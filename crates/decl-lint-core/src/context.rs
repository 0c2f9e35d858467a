//! Context types for rule execution.

use crate::location::LocationResolver;
use crate::syntax::SyntaxDump;
use crate::types::{Location, Position};
use std::path::Path;

/// Context provided to rules for one file.
///
/// Owns the file's [`LocationResolver`], which is built once and shared
/// read-only by every rule and declaration evaluated for the file.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path of the file as reported by the syntax provider.
    pub path: &'a Path,
    /// Offset resolution and line classifications for the file.
    pub resolver: LocationResolver<'a>,
}

impl<'a> FileContext<'a> {
    /// Creates a context from a syntax dump.
    #[must_use]
    pub fn new(dump: &'a SyntaxDump) -> Self {
        Self {
            path: &dump.path,
            resolver: LocationResolver::new(&dump.contents, &dump.tokens),
        }
    }

    /// Resolves a byte offset into a position.
    #[must_use]
    pub fn resolve(&self, offset: usize) -> Option<Position> {
        self.resolver.resolve(offset)
    }

    /// Builds a violation location for a byte offset.
    ///
    /// Returns `None` if the offset is outside the source text.
    #[must_use]
    pub fn location_for(&self, offset: usize) -> Option<Location> {
        self.resolve(offset)
            .map(|position| Location::at(self.path.to_path_buf(), position, offset))
    }
}
