//! Rule to enforce type naming conventions.
//!
//! # Rationale
//!
//! Type names should be alphanumeric, start with an uppercase character and
//! stay within a readable length. A single leading underscore is allowed on
//! private types.
//!
//! # Detected Patterns
//!
//! - Names containing characters other than letters and digits
//! - Names starting with a lowercase character or a digit
//! - Names shorter or longer than the configured tiers
//!
//! # Configuration
//!
//! - `min_length`: `{ warning, error }` minimum lengths (default: 3, 0)
//! - `max_length`: `{ warning, error }` maximum lengths (default: 40, 1000)
//! - `excluded`: names exempt from every check

use decl_lint_core::identifier::validated_name;
use decl_lint_core::{
    CasingRule, Config, ConfigError, DeclarationKind, DeclarationRecord, FileContext,
    IdentifierValidator, LevelPair, NameLengthLevels, Rule, Suggestion, TypeKind,
    ValidationOutcome, Violation,
};

/// Rule code for type-name.
pub const CODE: &str = "DL003";

/// Rule name for type-name.
pub const NAME: &str = "type-name";

const OPTIONS: &[&str] = &["min_length", "max_length", "excluded"];

/// Enforces naming conventions on classes, structs, enums, enum cases and
/// type aliases.
#[derive(Debug, Clone)]
pub struct TypeName {
    validator: IdentifierValidator,
}

impl Default for TypeName {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeName {
    /// Creates a new rule with default length tiers and no exclusions.
    #[must_use]
    pub fn new() -> Self {
        Self::with_lengths(default_lengths())
    }

    /// Creates a rule with explicit length tiers.
    #[must_use]
    pub fn with_lengths(lengths: NameLengthLevels) -> Self {
        Self {
            validator: IdentifierValidator::new(CasingRule::Type, lengths),
        }
    }

    /// Exempts `names` from every check.
    #[must_use]
    pub fn excluding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.validator = self.validator.excluding(names);
        self
    }

    /// Creates a rule from the `[rules.type-name]` table.
    ///
    /// # Errors
    ///
    /// Returns an error if the length tiers or exclusions are malformed or
    /// the table has unknown keys.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.check_options(NAME, OPTIONS)?;
        let lengths = config.name_lengths(NAME, &default_lengths())?;
        Ok(Self::with_lengths(lengths).excluding(config.excluded_names(NAME)?))
    }

    /// Returns the underlying validator.
    #[must_use]
    pub fn validator(&self) -> &IdentifierValidator {
        &self.validator
    }
}

fn default_lengths() -> NameLengthLevels {
    NameLengthLevels::new(
        LevelPair {
            warning: 3,
            error: 0,
        },
        LevelPair {
            warning: 40,
            error: 1000,
        },
    )
}

fn applies_to(kind: DeclarationKind) -> bool {
    match kind {
        DeclarationKind::Type(
            TypeKind::Class
            | TypeKind::Struct
            | TypeKind::Enum
            | TypeKind::EnumElement
            | TypeKind::Typealias,
        ) => true,
        DeclarationKind::Type(
            TypeKind::Protocol | TypeKind::Extension | TypeKind::AssociatedType,
        )
        | DeclarationKind::Function(_)
        | DeclarationKind::Variable(_) => false,
    }
}

impl Rule for TypeName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Type names should be alphanumeric, capitalized and of reasonable length"
    }

    fn thresholds(&self) -> Option<String> {
        Some(self.validator.lengths().to_string())
    }

    fn check(&self, ctx: &FileContext, decl: &DeclarationRecord) -> Option<Violation> {
        if !applies_to(decl.kind) {
            return None;
        }

        let name = decl.name.as_deref()?;
        let outcome = self.validator.validate(name, decl.is_private, false);
        let severity = outcome.severity()?;
        let location = ctx.location_for(decl.offset)?;
        let shown = validated_name(name, decl.is_private);

        let (message, suggestion) = match outcome {
            ValidationOutcome::Valid => return None,
            ValidationOutcome::InvalidCharacters => (
                format!("Type name should only contain alphanumeric characters: '{shown}'"),
                "Remove underscores and other symbols from the name",
            ),
            ValidationOutcome::InvalidCase => (
                format!("Type name should start with an uppercase character: '{shown}'"),
                "Use UpperCamelCase for type names",
            ),
            ValidationOutcome::InvalidLength(_) => {
                let lengths = self.validator.lengths();
                (
                    format!(
                        "Type name should be between {} and {} characters in length: '{shown}'",
                        lengths.min_threshold(),
                        lengths.max_threshold()
                    ),
                    "Choose a more descriptive or more concise name",
                )
            }
        };

        Some(
            Violation::new(CODE, NAME, severity, location, message)
                .with_suggestion(Suggestion::new(suggestion)),
        )
    }
}
