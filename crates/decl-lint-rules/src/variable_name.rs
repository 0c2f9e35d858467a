//! Rule to enforce variable naming conventions.
//!
//! Variable names must be alphanumeric and must not start with an uppercase
//! character unless the whole name is uppercase (`URL`, `ID`). Static
//! immutable members are exempt from the casing check so that constants such
//! as `static let MaxRetries` are accepted.
//!
//! # Configuration
//!
//! - `min_length`: `{ warning, error }` minimum lengths (default: 3, 2)
//! - `max_length`: `{ warning, error }` maximum lengths (default: 40, 60)
//! - `excluded`: names exempt from every check

use decl_lint_core::identifier::validated_name;
use decl_lint_core::{
    CasingRule, Config, ConfigError, DeclarationKind, DeclarationRecord, FileContext,
    IdentifierValidator, LevelPair, NameLengthLevels, Rule, Suggestion, ValidationOutcome,
    VariableKind, Violation,
};

/// Rule code for variable-name.
pub const CODE: &str = "DL004";

/// Rule name for variable-name.
pub const NAME: &str = "variable-name";

const OPTIONS: &[&str] = &["min_length", "max_length", "excluded"];

/// Enforces naming conventions on variables, properties and parameters.
#[derive(Debug, Clone)]
pub struct VariableName {
    validator: IdentifierValidator,
}

impl Default for VariableName {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableName {
    /// Creates a new rule with default length tiers and no exclusions.
    #[must_use]
    pub fn new() -> Self {
        Self::with_lengths(default_lengths())
    }

    /// Creates a rule with explicit length tiers.
    #[must_use]
    pub fn with_lengths(lengths: NameLengthLevels) -> Self {
        Self {
            validator: IdentifierValidator::new(CasingRule::Variable, lengths),
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

    /// Creates a rule from the `[rules.variable-name]` table.
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
            error: 2,
        },
        LevelPair {
            warning: 40,
            error: 60,
        },
    )
}

fn is_case_exempt(decl: &DeclarationRecord) -> bool {
    match decl.kind {
        DeclarationKind::Variable(VariableKind::Static) => decl.is_immutable,
        _ => false,
    }
}

impl Rule for VariableName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Variable names should be alphanumeric, lowercase-first and of reasonable length"
    }

    fn thresholds(&self) -> Option<String> {
        Some(self.validator.lengths().to_string())
    }

    fn check(&self, ctx: &FileContext, decl: &DeclarationRecord) -> Option<Violation> {
        let DeclarationKind::Variable(_) = decl.kind else {
            return None;
        };

        let name = decl.name.as_deref()?;
        let outcome = self
            .validator
            .validate(name, decl.is_private, is_case_exempt(decl));
        let severity = outcome.severity()?;
        let location = ctx.location_for(decl.offset)?;
        let shown = validated_name(name, decl.is_private);

        let (message, suggestion) = match outcome {
            ValidationOutcome::Valid => return None,
            ValidationOutcome::InvalidCharacters => (
                format!("Variable name should only contain alphanumeric characters: '{shown}'"),
                "Use lowerCamelCase without underscores or symbols",
            ),
            ValidationOutcome::InvalidCase => (
                format!("Variable name should start with a lowercase character: '{shown}'"),
                "Use lowerCamelCase for variable names",
            ),
            ValidationOutcome::InvalidLength(_) => {
                let lengths = self.validator.lengths();
                (
                    format!(
                        "Variable name should be between {} and {} characters in length: '{shown}'",
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
