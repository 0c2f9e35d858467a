//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::syntax::DeclarationRecord;
use crate::types::{Severity, Violation};

/// A per-declaration lint rule.
///
/// Rules are pure: given the same file context and declaration they always
/// return the same result, and they never mutate shared state. Missing data
/// (no name, no body span, an offset outside the text) yields `None`, never
/// an error.
///
/// # Example
///
/// ```ignore
/// use decl_lint_core::{DeclarationRecord, FileContext, Rule, Severity, Violation};
///
/// pub struct NoAnonymousTypes;
///
/// impl Rule for NoAnonymousTypes {
///     fn name(&self) -> &'static str { "no-anonymous-types" }
///     fn code(&self) -> &'static str { "DL100" }
///
///     fn check(&self, ctx: &FileContext, decl: &DeclarationRecord) -> Option<Violation> {
///         if decl.name.is_some() {
///             return None;
///         }
///         let location = ctx.location_for(decl.offset)?;
///         Some(Violation::new(self.code(), self.name(), Severity::Warning, location, "unnamed"))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "type-name").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DL003").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the most severe level this rule can report.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Summarizes the configured thresholds, if the rule has any.
    fn thresholds(&self) -> Option<String> {
        None
    }

    /// Checks a single declaration.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the file containing the declaration
    /// * `decl` - The declaration to check
    ///
    /// # Returns
    ///
    /// The violation, if the declaration fails this rule.
    fn check(&self, ctx: &FileContext, decl: &DeclarationRecord) -> Option<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
