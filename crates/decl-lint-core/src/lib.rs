//! # decl-lint-core
//!
//! Core engine for linting declarations against size and naming thresholds.
//!
//! The engine consumes declarations produced by an external syntax provider
//! (see [`SyntaxDump`]) and never parses source text itself. It includes:
//!
//! - [`LocationResolver`] for byte offset to line/column mapping
//! - [`LineSpan`] and [`effective_line_count`] for comment-aware line counts
//! - [`SeverityLevels`] and [`NameLengthLevels`] for tiered thresholds
//! - [`IdentifierValidator`] for character set, casing, and length checks
//! - [`Rule`] trait and [`Analyzer`] for orchestrating lint execution
//!
//! ## Example
//!
//! ```ignore
//! use decl_lint_core::{Analyzer, SyntaxDump};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let dump = SyntaxDump::from_file("out/Model.json".as_ref())?;
//! let result = analyzer.analyze(&[dump]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
pub mod identifier;
pub mod line_span;
mod location;
mod rule;
mod syntax;
pub mod threshold;
mod types;

pub use analyzer::{discover_dumps, Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use identifier::{CasingRule, IdentifierValidator, ValidationOutcome};
pub use line_span::{effective_line_count, LineSpan};
pub use location::{LineClassificationMap, LocationResolver};
pub use rule::{Rule, RuleBox};
pub use syntax::{
    DeclarationKind, DeclarationRecord, FunctionKind, SyntaxDump, SyntaxToken, TokenClass,
    TypeKind, VariableKind,
};
pub use threshold::{LevelPair, NameLengthLevels, SeverityLevels, ThresholdError, ThresholdTier};
pub use types::{
    LintResult, Location, ParseSeverityError, Position, Severity, Suggestion, Violation,
    ViolationDiagnostic,
};
