//! Tiered warning/error thresholds.
//!
//! Two shapes are supported:
//!
//! - [`SeverityLevels`]: upper bounds only, used for line-count rules.
//! - [`NameLengthLevels`]: min/max pairs, used for identifier lengths.
//!
//! Both are built through a builder that validates the values once; the
//! resulting value is immutable and shared by reference between evaluations.

use crate::types::Severity;

/// Errors raised when thresholds are malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThresholdError {
    /// No tier was configured.
    #[error("at least one threshold tier must be configured")]
    NoTiers,

    /// The same severity was configured twice.
    #[error("duplicate threshold tier for severity `{0}`")]
    DuplicateTier(Severity),

    /// The error range does not contain the warning range.
    #[error(
        "{bound} length error threshold ({error}) must be at least as permissive as the \
         warning threshold ({warning})"
    )]
    ErrorTighterThanWarning {
        /// `"min"` or `"max"`.
        bound: &'static str,
        /// Configured warning value.
        warning: usize,
        /// Configured error value.
        error: usize,
    },
}

/// One severity level with its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdTier {
    /// Severity reported when the bound is exceeded.
    pub severity: Severity,
    /// Largest permitted value.
    pub max: usize,
}

/// Upper-bound tiers, evaluated most severe first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityLevels {
    tiers: Vec<ThresholdTier>,
}

impl SeverityLevels {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> SeverityLevelsBuilder {
        SeverityLevelsBuilder::default()
    }

    /// Creates a warning tier and an error tier.
    #[must_use]
    pub fn new(warning: usize, error: usize) -> Self {
        Self {
            tiers: vec![
                ThresholdTier {
                    severity: Severity::Error,
                    max: error,
                },
                ThresholdTier {
                    severity: Severity::Warning,
                    max: warning,
                },
            ],
        }
    }

    /// Returns the most severe tier whose bound `measured` exceeds.
    ///
    /// The comparison is strict: `measured == max` does not exceed a tier.
    #[must_use]
    pub fn exceeded(&self, measured: usize) -> Option<&ThresholdTier> {
        self.tiers.iter().find(|tier| measured > tier.max)
    }

    /// Returns the smallest configured bound.
    #[must_use]
    pub fn tightest(&self) -> usize {
        self.tiers.iter().map(|t| t.max).min().unwrap_or(usize::MAX)
    }

    /// Returns the bound configured for `severity`, if any.
    #[must_use]
    pub fn limit(&self, severity: Severity) -> Option<usize> {
        self.tiers
            .iter()
            .find(|t| t.severity == severity)
            .map(|t| t.max)
    }

    /// Tiers in evaluation order.
    #[must_use]
    pub fn tiers(&self) -> &[ThresholdTier] {
        &self.tiers
    }
}

/// Builder for [`SeverityLevels`].
#[derive(Debug, Clone, Default)]
pub struct SeverityLevelsBuilder {
    tiers: Vec<ThresholdTier>,
}

impl SeverityLevelsBuilder {
    /// Adds a tier.
    #[must_use]
    pub fn tier(mut self, severity: Severity, max: usize) -> Self {
        self.tiers.push(ThresholdTier { severity, max });
        self
    }

    /// Adds the warning tier.
    #[must_use]
    pub fn warning(self, max: usize) -> Self {
        self.tier(Severity::Warning, max)
    }

    /// Adds the error tier.
    #[must_use]
    pub fn error(self, max: usize) -> Self {
        self.tier(Severity::Error, max)
    }

    /// Validates the tiers and orders them most severe first.
    ///
    /// # Errors
    ///
    /// Returns an error if no tier was added or a severity appears twice.
    pub fn build(mut self) -> Result<SeverityLevels, ThresholdError> {
        if self.tiers.is_empty() {
            return Err(ThresholdError::NoTiers);
        }
        self.tiers.sort_by(|a, b| b.severity.cmp(&a.severity));
        if let Some(pair) = self.tiers.windows(2).find(|w| w[0].severity == w[1].severity) {
            return Err(ThresholdError::DuplicateTier(pair[0].severity));
        }
        Ok(SeverityLevels { tiers: self.tiers })
    }
}

/// A warning/error pair for one side of a length range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPair {
    /// Bound that triggers a warning.
    pub warning: usize,
    /// Bound that triggers an error.
    pub error: usize,
}

/// Minimum and maximum name lengths with warning and error tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameLengthLevels {
    min_length: LevelPair,
    max_length: LevelPair,
}

impl NameLengthLevels {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> NameLengthLevelsBuilder {
        NameLengthLevelsBuilder::default()
    }

    /// Creates name length tiers from literal bounds.
    ///
    /// Error bounds tighter than their warning bound are widened to it, so the
    /// error range always contains the warning range. Use
    /// [`NameLengthLevels::builder`] to reject such input instead.
    #[must_use]
    pub fn new(min_length: LevelPair, max_length: LevelPair) -> Self {
        Self {
            min_length: LevelPair {
                warning: min_length.warning,
                error: min_length.error.min(min_length.warning),
            },
            max_length: LevelPair {
                warning: max_length.warning,
                error: max_length.error.max(max_length.warning),
            },
        }
    }

    /// Severity for a name of `length` characters, or `None` if acceptable.
    ///
    /// The error range is checked before the warning range.
    #[must_use]
    pub fn severity(&self, length: usize) -> Option<Severity> {
        if length < self.min_length.error || length > self.max_length.error {
            Some(Severity::Error)
        } else if length < self.min_length.warning || length > self.max_length.warning {
            Some(Severity::Warning)
        } else {
            None
        }
    }

    /// Lower bound quoted in reason text.
    #[must_use]
    pub fn min_threshold(&self) -> usize {
        self.min_length.warning.max(self.min_length.error)
    }

    /// Upper bound quoted in reason text.
    #[must_use]
    pub fn max_threshold(&self) -> usize {
        self.max_length.warning.min(self.max_length.error)
    }

    /// Minimum length tiers.
    #[must_use]
    pub fn min_length(&self) -> LevelPair {
        self.min_length
    }

    /// Maximum length tiers.
    #[must_use]
    pub fn max_length(&self) -> LevelPair {
        self.max_length
    }
}

impl std::fmt::Display for SeverityLevels {
    /// Least severe tier first, e.g. `warning > 40, error > 100`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, tier) in self.tiers.iter().rev().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} > {}", tier.severity, tier.max)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for NameLengthLevels {
    /// Accepted ranges, e.g. `warning outside 3..=40, error outside 0..=1000`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "warning outside {}..={}, error outside {}..={}",
            self.min_length.warning,
            self.max_length.warning,
            self.min_length.error,
            self.max_length.error
        )
    }
}

/// Builder for [`NameLengthLevels`].
///
/// Starts from the permissive range `0..=usize::MAX` for both tiers.
#[derive(Debug, Clone)]
pub struct NameLengthLevelsBuilder {
    min_length: LevelPair,
    max_length: LevelPair,
}

impl Default for NameLengthLevelsBuilder {
    fn default() -> Self {
        Self {
            min_length: LevelPair {
                warning: 0,
                error: 0,
            },
            max_length: LevelPair {
                warning: usize::MAX,
                error: usize::MAX,
            },
        }
    }
}

impl NameLengthLevelsBuilder {
    /// Sets the minimum length tiers.
    #[must_use]
    pub fn min_length(mut self, warning: usize, error: usize) -> Self {
        self.min_length = LevelPair { warning, error };
        self
    }

    /// Sets the maximum length tiers.
    #[must_use]
    pub fn max_length(mut self, warning: usize, error: usize) -> Self {
        self.max_length = LevelPair { warning, error };
        self
    }

    /// Validates that the error range contains the warning range.
    ///
    /// # Errors
    ///
    /// Returns an error if an error bound is tighter than its warning bound.
    pub fn build(self) -> Result<NameLengthLevels, ThresholdError> {
        if self.min_length.error > self.min_length.warning {
            return Err(ThresholdError::ErrorTighterThanWarning {
                bound: "min",
                warning: self.min_length.warning,
                error: self.min_length.error,
            });
        }
        if self.max_length.error < self.max_length.warning {
            return Err(ThresholdError::ErrorTighterThanWarning {
                bound: "max",
                warning: self.max_length.warning,
                error: self.max_length.error,
            });
        }
        Ok(NameLengthLevels {
            min_length: self.min_length,
            max_length: self.max_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_levels() -> SeverityLevels {
        SeverityLevels::new(40, 100)
    }

    fn type_name_levels() -> NameLengthLevels {
        NameLengthLevels::builder()
            .min_length(3, 0)
            .max_length(40, 1000)
            .build()
            .expect("valid levels")
    }

    #[test]
    fn boundary_value_does_not_trigger() {
        let levels = body_levels();
        assert_eq!(levels.exceeded(40), None);
        assert_eq!(
            levels.exceeded(41).map(|t| t.severity),
            Some(Severity::Warning)
        );
        assert_eq!(
            levels.exceeded(100).map(|t| t.severity),
            Some(Severity::Warning)
        );
        assert_eq!(levels.exceeded(101).map(|t| t.severity), Some(Severity::Error));
    }

    #[test]
    fn pair_constructor_matches_builder() {
        let built = SeverityLevels::builder().error(100).warning(40).build().unwrap();
        assert_eq!(SeverityLevels::new(40, 100), built);
    }

    #[test]
    fn literal_name_lengths_widen_error_range() {
        let levels = NameLengthLevels::new(
            LevelPair {
                warning: 3,
                error: 5,
            },
            LevelPair {
                warning: 40,
                error: 20,
            },
        );
        assert_eq!(levels.min_length().error, 3);
        assert_eq!(levels.max_length().error, 40);
        assert_eq!(levels.severity(2), Some(Severity::Error));
        assert_eq!(levels.severity(41), Some(Severity::Error));
    }

    #[test]
    fn most_severe_tier_wins_regardless_of_declaration_order() {
        let levels = SeverityLevels::builder()
            .warning(40)
            .error(100)
            .build()
            .unwrap();
        let tier = levels.exceeded(500).unwrap();
        assert_eq!(tier.severity, Severity::Error);
        assert_eq!(tier.max, 100);
        assert_eq!(levels.tiers()[0].severity, Severity::Error);
    }

    #[test]
    fn warning_only_levels() {
        let levels = SeverityLevels::builder().warning(10).build().unwrap();
        assert_eq!(levels.exceeded(11).map(|t| t.max), Some(10));
        assert_eq!(levels.limit(Severity::Error), None);
        assert_eq!(levels.tightest(), 10);
    }

    #[test]
    fn tightest_is_smallest_bound() {
        assert_eq!(body_levels().tightest(), 40);
    }

    #[test]
    fn empty_levels_are_rejected() {
        assert_eq!(
            SeverityLevels::builder().build(),
            Err(ThresholdError::NoTiers)
        );
    }

    #[test]
    fn duplicate_tier_is_rejected() {
        let err = SeverityLevels::builder()
            .warning(1)
            .warning(2)
            .build()
            .unwrap_err();
        assert_eq!(err, ThresholdError::DuplicateTier(Severity::Warning));
    }

    #[test]
    fn name_length_tiers() {
        let levels = type_name_levels();
        assert_eq!(levels.severity(2), Some(Severity::Warning));
        assert_eq!(levels.severity(3), None);
        assert_eq!(levels.severity(40), None);
        assert_eq!(levels.severity(41), Some(Severity::Warning));
        assert_eq!(levels.severity(1001), Some(Severity::Error));
    }

    #[test]
    fn name_below_error_floor_is_error() {
        let levels = NameLengthLevels::builder()
            .min_length(3, 2)
            .max_length(40, 60)
            .build()
            .unwrap();
        assert_eq!(levels.severity(1), Some(Severity::Error));
        assert_eq!(levels.severity(2), Some(Severity::Warning));
        assert_eq!(levels.severity(61), Some(Severity::Error));
    }

    #[test]
    fn display_lists_tiers_least_severe_first() {
        assert_eq!(body_levels().to_string(), "warning > 40, error > 100");
        let error_only = SeverityLevels::builder().error(7).build().unwrap();
        assert_eq!(error_only.to_string(), "error > 7");
        assert_eq!(
            type_name_levels().to_string(),
            "warning outside 3..=40, error outside 0..=1000"
        );
    }

    #[test]
    fn reason_thresholds_use_tighter_bounds() {
        let levels = type_name_levels();
        assert_eq!(levels.min_threshold(), 3);
        assert_eq!(levels.max_threshold(), 40);
    }

    #[test]
    fn error_range_must_contain_warning_range() {
        let err = NameLengthLevels::builder()
            .min_length(2, 3)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ThresholdError::ErrorTighterThanWarning { bound: "min", .. }
        ));

        let err = NameLengthLevels::builder()
            .max_length(40, 20)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ThresholdError::ErrorTighterThanWarning { bound: "max", .. }
        ));
    }
}
