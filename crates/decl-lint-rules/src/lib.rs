//! # decl-lint-rules
//!
//! Built-in declaration rules for decl-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | DL001 | `function-body-length` | Limits function bodies, not counting comment-only lines |
//! | DL002 | `type-body-length` | Limits class, struct and enum bodies |
//! | DL003 | `type-name` | Enforces character set, casing and length of type names |
//! | DL004 | `variable-name` | Enforces character set, casing and length of variable names |
//!
//! ## Usage
//!
//! ```ignore
//! use decl_lint_core::Analyzer;
//! use decl_lint_rules::{FunctionBodyLength, TypeName};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(FunctionBodyLength::new())
//!     .rule(TypeName::new().excluding(["ID"]))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod function_body_length;
mod registry;
pub mod type_body_length;
pub mod type_name;
pub mod variable_name;

pub use function_body_length::FunctionBodyLength;
pub use registry::{all_rules, rules_from_config, select_rules};
pub use type_body_length::TypeBodyLength;
pub use type_name::TypeName;
pub use variable_name::VariableName;

/// Re-export core types for convenience.
pub use decl_lint_core::{Rule, Severity, Violation};
