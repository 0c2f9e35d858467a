//! Check command implementation.

use anyhow::{bail, Context, Result};
use decl_lint_core::{discover_dumps, Analyzer, Config, LintResult, Severity};
use decl_lint_rules::{rules_from_config, select_rules};
use std::path::PathBuf;

use crate::project::ProjectSettings;
use crate::OutputFormat;

/// Runs the check command and returns the process exit code.
pub fn run(
    paths: &[PathBuf],
    format: OutputFormat,
    rules_filter: Option<String>,
    fail_on: Option<Severity>,
    settings: ProjectSettings,
) -> Result<i32> {
    let roots = settings.dump_roots(paths);
    let config = settings.config;
    let fail_on = effective_fail_on(fail_on, &config);

    let mut rules = rules_from_config(&config).context("Invalid rule configuration")?;
    if let Some(filter) = rules_filter {
        let selected: Vec<String> = filter
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        let (kept, unknown) = select_rules(rules, &selected);
        for name in &unknown {
            tracing::warn!("Unknown rule: {}", name);
        }
        if kept.is_empty() {
            bail!("No known rules selected by --rules {}", selected.join(","));
        }
        rules = kept;
    }

    let analyzer = Analyzer::builder()
        .rules(rules)
        .config(config)
        .build()
        .context("Failed to build analyzer")?;

    let mut files = Vec::new();
    for path in &roots {
        files.extend(
            discover_dumps(path)
                .with_context(|| format!("Failed to search {}", path.display()))?,
        );
    }

    tracing::info!(
        "Checking {} dump(s) with {} rules",
        files.len(),
        analyzer.rule_count()
    );

    let dumps = analyzer.load_dumps(&files).context("Failed to load dumps")?;
    let result = analyzer.analyze(&dumps);

    super::output::print(&result, &dumps, format)?;

    Ok(exit_code(&result, fail_on))
}

/// Flag beats config, config beats the `error` default.
fn effective_fail_on(flag: Option<Severity>, config: &Config) -> Severity {
    flag.or(config.fail_on).unwrap_or(Severity::Error)
}

fn exit_code(result: &LintResult, fail_on: Severity) -> i32 {
    i32::from(result.has_violations_at(fail_on))
}

#[cfg(test)]
mod tests {
    use super::*;
    use decl_lint_core::{Location, Violation};

    fn result_with(severity: Severity) -> LintResult {
        LintResult {
            violations: vec![Violation::new(
                "DL004",
                "variable-name",
                severity,
                Location::new(PathBuf::from("a.swift"), 1, 1),
                "msg",
            )],
            files_checked: 1,
        }
    }

    #[test]
    fn fail_on_precedence() {
        let config = Config::parse("fail_on = \"warning\"\n").unwrap();
        assert_eq!(effective_fail_on(None, &Config::default()), Severity::Error);
        assert_eq!(effective_fail_on(None, &config), Severity::Warning);
        assert_eq!(
            effective_fail_on(Some(Severity::Error), &config),
            Severity::Error
        );
    }

    #[test]
    fn exit_code_follows_threshold() {
        assert_eq!(exit_code(&LintResult::new(), Severity::Warning), 0);
        assert_eq!(exit_code(&result_with(Severity::Warning), Severity::Error), 0);
        assert_eq!(exit_code(&result_with(Severity::Warning), Severity::Warning), 1);
        assert_eq!(exit_code(&result_with(Severity::Error), Severity::Error), 1);
    }
}
