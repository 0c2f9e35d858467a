//! Configuration types for decl-lint.
//!
//! Configuration is parsed once from TOML and then treated as immutable; rules
//! read their thresholds from it when they are constructed.

use crate::threshold::{NameLengthLevels, SeverityLevels, ThresholdError};
use crate::types::Severity;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for decl-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Severity threshold for a failing run (default: error).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid, including unknown severity
    /// names.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Returns the upper-bound tiers for a rule.
    ///
    /// `warning` and `error` keys override the matching tier of `defaults`;
    /// a tier that is not mentioned keeps its default bound.
    ///
    /// # Errors
    ///
    /// Returns an error if an option has the wrong type.
    pub fn severity_levels(
        &self,
        rule_name: &str,
        defaults: &SeverityLevels,
    ) -> Result<SeverityLevels, ConfigError> {
        let Some(rule) = self.rules.get(rule_name) else {
            return Ok(defaults.clone());
        };

        let mut builder = SeverityLevels::builder();
        for severity in [Severity::Warning, Severity::Error] {
            let key = severity.to_string();
            let configured = rule.try_option::<usize>(rule_name, &key)?;
            if let Some(max) = configured.or_else(|| defaults.limit(severity)) {
                builder = builder.tier(severity, max);
            }
        }
        builder.build().map_err(|source| ConfigError::Threshold {
            rule: rule_name.to_string(),
            source,
        })
    }

    /// Returns the name length tiers for a rule.
    ///
    /// `min_length` and `max_length` tables override `defaults` field by field.
    ///
    /// # Errors
    ///
    /// Returns an error if an option has the wrong type or the resulting error
    /// range does not contain the warning range.
    pub fn name_lengths(
        &self,
        rule_name: &str,
        defaults: &NameLengthLevels,
    ) -> Result<NameLengthLevels, ConfigError> {
        let Some(rule) = self.rules.get(rule_name) else {
            return Ok(*defaults);
        };

        let min = rule
            .try_option::<LevelsOption>(rule_name, "min_length")?
            .unwrap_or_default();
        let max = rule
            .try_option::<LevelsOption>(rule_name, "max_length")?
            .unwrap_or_default();
        let (dmin, dmax) = (defaults.min_length(), defaults.max_length());

        NameLengthLevels::builder()
            .min_length(
                min.warning.unwrap_or(dmin.warning),
                min.error.unwrap_or(dmin.error),
            )
            .max_length(
                max.warning.unwrap_or(dmax.warning),
                max.error.unwrap_or(dmax.error),
            )
            .build()
            .map_err(|source| ConfigError::Threshold {
                rule: rule_name.to_string(),
                source,
            })
    }

    /// Rejects option keys in a rule table that the rule does not read.
    ///
    /// `enabled` and `severity` are accepted for every rule.
    ///
    /// # Errors
    ///
    /// Returns the alphabetically first unknown key.
    pub fn check_options(&self, rule_name: &str, allowed: &[&str]) -> Result<(), ConfigError> {
        let Some(rule) = self.rules.get(rule_name) else {
            return Ok(());
        };
        let mut unknown: Vec<&String> = rule
            .options
            .keys()
            .filter(|key| !allowed.contains(&key.as_str()))
            .collect();
        unknown.sort_unstable();
        match unknown.first() {
            Some(key) => Err(ConfigError::UnknownOption {
                rule: rule_name.to_string(),
                key: (*key).clone(),
            }),
            None => Ok(()),
        }
    }

    /// Returns the names a rule exempts from every check.
    ///
    /// # Errors
    ///
    /// Returns an error if `excluded` is not an array of strings.
    pub fn excluded_names(&self, rule_name: &str) -> Result<Vec<String>, ConfigError> {
        match self.rules.get(rule_name) {
            Some(rule) => Ok(rule
                .try_option::<Vec<String>>(rule_name, "excluded")?
                .unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }
}

/// A `{ warning, error }` table where either key may be omitted.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelsOption {
    #[serde(default)]
    warning: Option<usize>,
    #[serde(default)]
    error: Option<usize>,
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Abort the run when a syntax dump cannot be read or parsed.
    #[serde(default)]
    pub fail_on_parse_error: bool,

    /// Maximum number of files evaluated in parallel.
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// Dump files or directories checked when none are given on the command
    /// line. Relative entries are resolved against the config file's directory.
    #[serde(default)]
    pub dump_dirs: Vec<PathBuf>,
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an option value as a specific type, rejecting mistyped values.
    ///
    /// # Errors
    ///
    /// Returns an error if the option is present but cannot be converted.
    pub fn try_option<T: DeserializeOwned>(
        &self,
        rule_name: &str,
        key: &str,
    ) -> Result<Option<T>, ConfigError> {
        self.options
            .get(key)
            .map(|v| {
                v.clone()
                    .try_into()
                    .map_err(|e: toml::de::Error| ConfigError::InvalidOption {
                        rule: rule_name.to_string(),
                        key: key.to_string(),
                        message: e.to_string(),
                    })
            })
            .transpose()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A `[rules.*]` table names no known rule.
    #[error("Unknown rule `{rule}` in config")]
    UnknownRule {
        /// Table name as written.
        rule: String,
    },

    /// A rule table contains a key the rule does not read.
    #[error("Unknown option `{key}` for rule {rule}")]
    UnknownOption {
        /// Rule the option belongs to.
        rule: String,
        /// Option key.
        key: String,
    },

    /// A rule option has the wrong shape.
    #[error("Invalid option `{key}` for rule {rule}: {message}")]
    InvalidOption {
        /// Rule the option belongs to.
        rule: String,
        /// Option key.
        key: String,
        /// Conversion error message.
        message: String,
    },

    /// Threshold values are inconsistent.
    #[error("Invalid thresholds for rule {rule}: {source}")]
    Threshold {
        /// Rule the thresholds belong to.
        rule: String,
        /// Underlying threshold error.
        source: ThresholdError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_defaults() -> SeverityLevels {
        SeverityLevels::new(40, 100)
    }

    fn name_defaults() -> NameLengthLevels {
        NameLengthLevels::builder()
            .min_length(3, 2)
            .max_length(40, 60)
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.rules.is_empty());
        assert!(config.fail_on.is_none());
        assert!(!config.analyzer.fail_on_parse_error);
        assert!(config.analyzer.dump_dirs.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
fail_on = "warning"

[analyzer]
parallelism = 4
dump_dirs = ["build/dumps", "/abs/dumps"]

[rules.function-body-length]
warning = 50

[rules.variable-name]
enabled = false
severity = "warning"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.fail_on, Some(Severity::Warning));
        assert_eq!(config.analyzer.parallelism, Some(4));
        assert_eq!(
            config.analyzer.dump_dirs,
            vec![PathBuf::from("build/dumps"), PathBuf::from("/abs/dumps")]
        );
        assert!(config.is_rule_enabled("function-body-length"));
        assert!(!config.is_rule_enabled("variable-name"));
        assert!(config.is_rule_enabled("type-name"));
        assert_eq!(
            config.rule_severity("variable-name"),
            Some(Severity::Warning)
        );
    }

    #[test]
    fn severity_names_are_case_insensitive() {
        let config =
            Config::parse("fail_on = \"Error\"\n[rules.type-name]\nseverity = \"Warning\"\n")
                .unwrap();
        assert_eq!(config.fail_on, Some(Severity::Error));
        assert_eq!(config.rule_severity("type-name"), Some(Severity::Warning));
    }

    #[test]
    fn unknown_severity_is_a_parse_error() {
        let err = Config::parse("[rules.type-name]\nseverity = \"fatal\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn check_options_reports_misspelled_keys() {
        let config = Config::parse(
            "[rules.function-body-length]\nenabled = true\nwarning = 50\nwarnign = 60\nerorr = 90\n",
        )
        .unwrap();
        let allowed = ["warning", "error"];
        let err = config
            .check_options("function-body-length", &allowed)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownOption { ref rule, ref key }
                if rule == "function-body-length" && key == "erorr"
        ));
        assert!(config.check_options("type-body-length", &allowed).is_ok());

        let clean =
            Config::parse("[rules.function-body-length]\nseverity = \"warning\"\nerror = 90\n")
                .unwrap();
        assert!(clean.check_options("function-body-length", &allowed).is_ok());
    }

    #[test]
    fn severity_levels_partial_override() {
        let config = Config::parse("[rules.function-body-length]\nwarning = 50\n").unwrap();
        let levels = config
            .severity_levels("function-body-length", &body_defaults())
            .unwrap();
        assert_eq!(levels.limit(Severity::Warning), Some(50));
        assert_eq!(levels.limit(Severity::Error), Some(100));
    }

    #[test]
    fn severity_levels_default_when_unconfigured() {
        let levels = Config::default()
            .severity_levels("type-body-length", &body_defaults())
            .unwrap();
        assert_eq!(levels, body_defaults());
    }

    #[test]
    fn mistyped_threshold_is_rejected() {
        let config = Config::parse("[rules.function-body-length]\nerror = \"lots\"\n").unwrap();
        let err = config
            .severity_levels("function-body-length", &body_defaults())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { ref key, .. } if key == "error"));
    }

    #[test]
    fn name_lengths_override_field_by_field() {
        let config = Config::parse(
            "[rules.variable-name]\nmin_length = { warning = 4 }\nmax_length = { error = 80 }\n",
        )
        .unwrap();
        let levels = config
            .name_lengths("variable-name", &name_defaults())
            .unwrap();
        assert_eq!(levels.min_length().warning, 4);
        assert_eq!(levels.min_length().error, 2);
        assert_eq!(levels.max_length().warning, 40);
        assert_eq!(levels.max_length().error, 80);
    }

    #[test]
    fn inconsistent_name_lengths_are_rejected() {
        let config =
            Config::parse("[rules.variable-name]\nmin_length = { warning = 1, error = 5 }\n")
                .unwrap();
        let err = config
            .name_lengths("variable-name", &name_defaults())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Threshold { .. }));
    }

    #[test]
    fn excluded_names() {
        let config = Config::parse("[rules.type-name]\nexcluded = [\"ID\", \"URL\"]\n").unwrap();
        assert_eq!(
            config.excluded_names("type-name").unwrap(),
            vec!["ID".to_string(), "URL".to_string()]
        );
        assert!(config.excluded_names("variable-name").unwrap().is_empty());
    }
}
