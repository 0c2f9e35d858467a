//! Shared output formatting for lint results.

use anyhow::Result;
use decl_lint_core::{LintResult, Severity, SyntaxDump, ViolationDiagnostic};
use miette::{NamedSource, Report};
use std::collections::HashMap;
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `dumps` supplies the source text for the `pretty` format.
pub fn print(result: &LintResult, dumps: &[SyntaxDump], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, dumps),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
        };

        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        println!("  {}: {}", severity_indicator, violation.message);
        if let Some(suggestion) = &violation.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }

    println!("{}", summary_line(result));
}

fn summary_line(result: &LintResult) -> String {
    let (errors, warnings) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    format!(
        "{}Found {} error(s), {} warning(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, result.files_checked
    )
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_pretty(result: &LintResult, dumps: &[SyntaxDump]) {
    let sources: HashMap<&Path, &str> = dumps
        .iter()
        .map(|dump| (dump.path.as_path(), dump.contents.as_str()))
        .collect();

    for violation in &result.violations {
        let report = Report::new(ViolationDiagnostic::from(violation));
        let report = match sources.get(violation.location.file.as_path()) {
            Some(contents) => report.with_source_code(NamedSource::new(
                violation.location.file.display().to_string(),
                (*contents).to_string(),
            )),
            None => report,
        };
        println!("{report:?}");
    }

    println!("{}", summary_line(result));
}
