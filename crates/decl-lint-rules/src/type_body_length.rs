//! Rule to limit the length of type bodies.
//!
//! Applies to classes, structs and enums. Every line between the braces
//! counts, comments included.
//!
//! # Configuration
//!
//! - `warning`: Maximum lines before a warning (default: 200)
//! - `error`: Maximum lines before an error (default: 350)

use decl_lint_core::{
    Config, ConfigError, DeclarationKind, DeclarationRecord, FileContext, LineSpan, Rule,
    SeverityLevels, Suggestion, TypeKind, Violation,
};

/// Rule code for type-body-length.
pub const CODE: &str = "DL002";

/// Rule name for type-body-length.
pub const NAME: &str = "type-body-length";

const DEFAULT_WARNING: usize = 200;
const DEFAULT_ERROR: usize = 350;
const OPTIONS: &[&str] = &["warning", "error"];

/// Limits the number of lines in class, struct and enum bodies.
#[derive(Debug, Clone)]
pub struct TypeBodyLength {
    levels: SeverityLevels,
}

impl Default for TypeBodyLength {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeBodyLength {
    /// Creates a new rule with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: default_levels(),
        }
    }

    /// Creates a rule with explicit thresholds.
    #[must_use]
    pub fn with_levels(levels: SeverityLevels) -> Self {
        Self { levels }
    }

    /// Creates a rule from the `[rules.type-body-length]` table.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured thresholds are malformed or the
    /// table has keys other than `warning` and `error`.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.check_options(NAME, OPTIONS)?;
        config
            .severity_levels(NAME, &default_levels())
            .map(Self::with_levels)
    }

    /// Returns the configured thresholds.
    #[must_use]
    pub fn levels(&self) -> &SeverityLevels {
        &self.levels
    }
}

fn default_levels() -> SeverityLevels {
    SeverityLevels::new(DEFAULT_WARNING, DEFAULT_ERROR)
}

fn applies_to(kind: DeclarationKind) -> bool {
    match kind {
        DeclarationKind::Type(TypeKind::Class | TypeKind::Struct | TypeKind::Enum) => true,
        DeclarationKind::Type(
            TypeKind::EnumElement
            | TypeKind::Typealias
            | TypeKind::Protocol
            | TypeKind::Extension
            | TypeKind::AssociatedType,
        )
        | DeclarationKind::Function(_)
        | DeclarationKind::Variable(_) => false,
    }
}

impl Rule for TypeBodyLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Type bodies should not span too many lines"
    }

    fn thresholds(&self) -> Option<String> {
        Some(self.levels.to_string())
    }

    fn check(&self, ctx: &FileContext, decl: &DeclarationRecord) -> Option<Violation> {
        if !applies_to(decl.kind) {
            return None;
        }

        let (body_offset, body_length) = decl.body()?;
        let location = ctx.location_for(decl.offset)?;
        let count = LineSpan::of_body(&ctx.resolver, body_offset, body_length)?.raw_len();
        let tier = self.levels.exceeded(count)?;

        Some(
            Violation::new(
                CODE,
                NAME,
                tier.severity,
                location,
                format!(
                    "Type body should span {} lines or less: currently spans {} lines",
                    tier.max, count
                ),
            )
            .with_suggestion(Suggestion::new(
                "Move related members into extensions or separate types",
            )),
        )
    }
}
