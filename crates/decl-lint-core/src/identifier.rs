//! Identifier validation: exclusions, character set, casing, and length.

use crate::threshold::NameLengthLevels;
use crate::types::Severity;
use std::collections::BTreeSet;

/// Casing convention an identifier must follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasingRule {
    /// First character must be uppercase.
    Type,
    /// Must not start uppercase unless the whole name is uppercase.
    Variable,
}

/// Result of validating one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The identifier passes every check.
    Valid,
    /// The identifier contains a non-alphanumeric character.
    InvalidCharacters,
    /// The identifier violates the casing rule.
    InvalidCase,
    /// The identifier length falls outside a configured tier.
    InvalidLength(Severity),
}

impl ValidationOutcome {
    /// Severity of the outcome, or `None` when valid.
    #[must_use]
    pub const fn severity(self) -> Option<Severity> {
        match self {
            Self::Valid => None,
            Self::InvalidCharacters | Self::InvalidCase => Some(Severity::Error),
            Self::InvalidLength(severity) => Some(severity),
        }
    }
}

/// Returns the form of `name` that is validated.
///
/// One leading underscore is dropped from private declarations.
#[must_use]
pub fn validated_name(name: &str, is_private: bool) -> &str {
    if is_private {
        name.strip_prefix('_').unwrap_or(name)
    } else {
        name
    }
}

fn is_all_uppercase(name: &str) -> bool {
    !name.chars().any(char::is_lowercase)
}

/// Validates identifiers against one rule's configuration.
#[derive(Debug, Clone)]
pub struct IdentifierValidator {
    casing: CasingRule,
    lengths: NameLengthLevels,
    excluded: BTreeSet<String>,
}

impl IdentifierValidator {
    /// Creates a validator with no excluded names.
    #[must_use]
    pub fn new(casing: CasingRule, lengths: NameLengthLevels) -> Self {
        Self {
            casing,
            lengths,
            excluded: BTreeSet::new(),
        }
    }

    /// Exempts the given names from every check.
    #[must_use]
    pub fn excluding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    /// Length tiers used by this validator.
    #[must_use]
    pub fn lengths(&self) -> &NameLengthLevels {
        &self.lengths
    }

    /// Returns true if `name` is on the exclusion list.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// Validates `name`, stopping at the first failing check.
    ///
    /// `case_exempt` lifts the variable casing check (static immutable
    /// members may be capitalized). Casing uses Unicode case properties, so a
    /// leading digit is not uppercase: it fails the type check and passes the
    /// variable check.
    #[must_use]
    pub fn validate(&self, name: &str, is_private: bool, case_exempt: bool) -> ValidationOutcome {
        if self.is_excluded(name) {
            return ValidationOutcome::Valid;
        }

        let name = validated_name(name, is_private);

        if !name.chars().all(char::is_alphanumeric) {
            return ValidationOutcome::InvalidCharacters;
        }

        if let Some(first) = name.chars().next() {
            let violates_case = match self.casing {
                CasingRule::Type => !first.is_uppercase(),
                CasingRule::Variable => {
                    !case_exempt && first.is_uppercase() && !is_all_uppercase(name)
                }
            };
            if violates_case {
                return ValidationOutcome::InvalidCase;
            }
        }

        match self.lengths.severity(name.chars().count()) {
            Some(severity) => ValidationOutcome::InvalidLength(severity),
            None => ValidationOutcome::Valid,
        }
    }
}
