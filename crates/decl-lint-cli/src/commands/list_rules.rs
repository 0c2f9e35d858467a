//! List rules command implementation.

use anyhow::{Context, Result};
use decl_lint_core::{Config, RuleBox};
use decl_lint_rules::rules_from_config;
use std::fmt::Write as _;

use crate::project::ProjectSettings;

/// Runs the list-rules command, showing each rule as configured.
pub fn run(settings: &ProjectSettings) -> Result<()> {
    let rules = rules_from_config(&settings.config).context("Invalid rule configuration")?;
    match settings.source.path() {
        Some(path) => println!("Rules as configured by {}:\n", path.display()),
        None => println!("Rules with default settings:\n"),
    }
    print!("{}", render(&rules, &settings.config));

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  decl-lint check --rules function-body-length,type-name");
    println!("  decl-lint check --rules DL001,DL003");
    Ok(())
}

/// One block per rule: header line, description, then thresholds.
fn render(rules: &[RuleBox], config: &Config) -> String {
    let mut out = String::new();
    for rule in rules {
        let mut status = if config.is_rule_enabled(rule.name()) {
            "enabled".to_string()
        } else {
            "disabled".to_string()
        };
        if let Some(severity) = config.rule_severity(rule.name()) {
            let _ = write!(status, ", reported as {severity}");
        }

        let _ = writeln!(out, "{:<7}{:<23}[{status}]", rule.code(), rule.name());
        let _ = writeln!(out, "{:7}{}", "", rule.description());
        if let Some(thresholds) = rule.thresholds() {
            let _ = writeln!(out, "{:7}{thresholds}", "");
        }
    }
    out
}
