//! Built-in rule sets.

use crate::{
    function_body_length, type_body_length, type_name, variable_name, FunctionBodyLength,
    TypeBodyLength, TypeName, VariableName,
};
use decl_lint_core::{Config, ConfigError, RuleBox};
use tracing::debug;

/// Names accepted as `[rules.*]` tables.
const RULE_NAMES: [&str; 4] = [
    function_body_length::NAME,
    type_body_length::NAME,
    type_name::NAME,
    variable_name::NAME,
];

/// Returns every built-in rule with its default thresholds.
///
/// Includes:
/// - `function-body-length` (DL001)
/// - `type-body-length` (DL002)
/// - `type-name` (DL003)
/// - `variable-name` (DL004)
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(FunctionBodyLength::new()),
        Box::new(TypeBodyLength::new()),
        Box::new(TypeName::new()),
        Box::new(VariableName::new()),
    ]
}

/// Returns every built-in rule configured from `config`.
///
/// Rules disabled in `config` are still returned; the analyzer skips them.
///
/// # Errors
///
/// Returns an error for a table naming no built-in rule, otherwise the first
/// malformed rule table.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let mut unknown: Vec<&String> = config
        .rules
        .keys()
        .filter(|name| !RULE_NAMES.contains(&name.as_str()))
        .collect();
    unknown.sort_unstable();
    if let Some(name) = unknown.first() {
        return Err(ConfigError::UnknownRule {
            rule: (*name).clone(),
        });
    }

    let function_body = FunctionBodyLength::from_config(config)?;
    let type_body = TypeBodyLength::from_config(config)?;
    debug!(
        "Body thresholds: function {:?}, type {:?}",
        function_body.levels().tiers(),
        type_body.levels().tiers()
    );

    let type_name = TypeName::from_config(config)?;
    let variable_name = VariableName::from_config(config)?;
    debug!(
        "Name lengths: type {:?}, variable {:?}",
        type_name.validator().lengths(),
        variable_name.validator().lengths()
    );

    Ok(vec![
        Box::new(function_body),
        Box::new(type_body),
        Box::new(type_name),
        Box::new(variable_name),
    ])
}

/// Keeps only the rules whose name or code appears in `selected`.
///
/// Returns the entries of `selected` that matched no rule alongside the kept
/// rules.
#[must_use]
pub fn select_rules(rules: Vec<RuleBox>, selected: &[String]) -> (Vec<RuleBox>, Vec<String>) {
    let matches = |rule: &RuleBox, key: &str| {
        rule.name() == key || rule.code().eq_ignore_ascii_case(key)
    };

    let unknown = selected
        .iter()
        .filter(|key| !rules.iter().any(|rule| matches(rule, key)))
        .cloned()
        .collect();
    let kept = rules
        .into_iter()
        .filter(|rule| selected.iter().any(|key| matches(rule, key)))
        .collect();
    (kept, unknown)
}
