//! Rule to limit the length of function bodies.
//!
//! # Rationale
//!
//! Long function bodies are hard to read and test. Comment-only lines do not
//! count towards the limit, so documenting a function never pushes it over.
//!
//! # Detected Patterns
//!
//! - Any function-like declaration (free functions, methods, initializers,
//!   deinitializers, operators, subscripts, accessors) whose body spans more
//!   lines than a configured tier allows
//!
//! # Configuration
//!
//! - `warning`: Maximum lines before a warning (default: 40)
//! - `error`: Maximum lines before an error (default: 100)

use decl_lint_core::line_span::exceeds_excluding_comments;
use decl_lint_core::{
    Config, ConfigError, DeclarationKind, DeclarationRecord, FileContext, LineSpan, Rule,
    SeverityLevels, Severity, Suggestion, Violation,
};

/// Rule code for function-body-length.
pub const CODE: &str = "DL001";

/// Rule name for function-body-length.
pub const NAME: &str = "function-body-length";

const DEFAULT_WARNING: usize = 40;
const DEFAULT_ERROR: usize = 100;
const OPTIONS: &[&str] = &["warning", "error"];

/// Limits the number of non-comment lines in function bodies.
#[derive(Debug, Clone)]
pub struct FunctionBodyLength {
    levels: SeverityLevels,
}

impl Default for FunctionBodyLength {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionBodyLength {
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

    /// Creates a rule from the `[rules.function-body-length]` table.
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
        DeclarationKind::Function(_) => true,
        DeclarationKind::Type(_) | DeclarationKind::Variable(_) => false,
    }
}

impl Rule for FunctionBodyLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Function bodies should not span too many lines"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
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
        let span = LineSpan::of_body(&ctx.resolver, body_offset, body_length)?;

        let (exceeds, count) =
            exceeds_excluding_comments(span, ctx.resolver.classification_map(), self.levels.tightest());
        if !exceeds {
            return None;
        }
        let tier = self.levels.exceeded(count)?;

        Some(
            Violation::new(
                CODE,
                NAME,
                tier.severity,
                location,
                format!(
                    "Function body should span {} lines or less excluding comments and \
                     whitespace: currently spans {} lines",
                    tier.max, count
                ),
            )
            .with_suggestion(Suggestion::new(
                "Extract parts of the body into smaller functions",
            )),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decl_lint_core::{FunctionKind, SyntaxDump, SyntaxToken, TokenClass, TypeKind};
    use std::path::PathBuf;

    const HEADER: &str = "func run() {";

    /// Builds a file with one function whose body holds `lines`.
    ///
    /// Lines starting with `//` are tokenized as comments, blank lines get no
    /// tokens, everything else is tokenized as code.
    fn function_dump(lines: &[&str]) -> SyntaxDump {
        let mut contents = format!("{HEADER}\n");
        let mut tokens = vec![SyntaxToken::new(0, 4, TokenClass::Keyword)];
        for line in lines {
            let offset = contents.len();
            if !line.trim().is_empty() {
                let kind = if line.trim_start().starts_with("//") {
                    TokenClass::Comment
                } else {
                    TokenClass::Identifier
                };
                tokens.push(SyntaxToken::new(offset, line.len(), kind));
            }
            contents.push_str(line);
            contents.push('\n');
        }
        let close = contents.len();
        contents.push_str("}\n");

        let body_offset = HEADER.len();
        let decl = DeclarationRecord::new(DeclarationKind::Function(FunctionKind::Free), 0)
            .named("run()")
            .with_body(body_offset, close - body_offset);

        SyntaxDump {
            path: PathBuf::from("Sources/Run.swift"),
            contents,
            tokens,
            declarations: vec![decl],
        }
    }

    fn check_with(rule: &FunctionBodyLength, dump: &SyntaxDump) -> Option<Violation> {
        let ctx = FileContext::new(dump);
        rule.check(&ctx, &dump.declarations[0])
    }

    fn check(dump: &SyntaxDump) -> Option<Violation> {
        check_with(&FunctionBodyLength::new(), dump)
    }

    fn code_lines(n: usize) -> Vec<&'static str> {
        vec!["    work()"; n]
    }

    #[test]
    fn allows_body_at_limit() {
        // 39 inner lines span 40 lines from the opening to the closing brace.
        assert!(check(&function_dump(&code_lines(39))).is_none());
    }

    #[test]
    fn warns_one_line_over_limit() {
        let violation = check(&function_dump(&code_lines(40))).expect("should warn");
        assert_eq!(violation.severity, Severity::Warning);
        assert_eq!((violation.location.line, violation.location.column), (1, 1));
        insta::assert_snapshot!(
            violation.message,
            @"Function body should span 40 lines or less excluding comments and whitespace: currently spans 41 lines"
        );
    }

    #[test]
    fn errors_past_error_tier() {
        let violation = check(&function_dump(&code_lines(150))).expect("should fail");
        assert_eq!(violation.severity, Severity::Error);
        assert!(violation.message.contains("span 100 lines or less"));
        assert!(violation.message.contains("currently spans 151 lines"));
    }

    #[test]
    fn comment_lines_do_not_count() {
        let mut lines = code_lines(36);
        lines.extend(["    // explain", "    // more", "    /// docs", "    // end"]);
        // Raw span is 41, effective span is 37.
        assert!(check(&function_dump(&lines)).is_none());

        lines.extend(code_lines(4));
        let violation = check(&function_dump(&lines)).expect("should warn");
        assert!(violation.message.contains("currently spans 41 lines"));
    }

    #[test]
    fn blank_lines_count_as_code() {
        let mut lines = code_lines(38);
        lines.extend(["", ""]);
        let violation = check(&function_dump(&lines)).expect("should warn");
        assert!(violation.message.contains("currently spans 41 lines"));
    }

    #[test]
    fn custom_levels() {
        let rule = FunctionBodyLength::with_levels(SeverityLevels::new(2, 4));
        assert!(check_with(&rule, &function_dump(&code_lines(1))).is_none());
        assert_eq!(
            check_with(&rule, &function_dump(&code_lines(2))).map(|v| v.severity),
            Some(Severity::Warning)
        );
        assert_eq!(
            check_with(&rule, &function_dump(&code_lines(4))).map(|v| v.severity),
            Some(Severity::Error)
        );
    }

    #[test]
    fn missing_body_is_not_a_violation() {
        let mut dump = function_dump(&code_lines(200));
        dump.declarations[0].body_length = None;
        assert!(check(&dump).is_none());
    }

    #[test]
    fn body_outside_text_is_not_a_violation() {
        let mut dump = function_dump(&code_lines(200));
        dump.declarations[0].body_length = Some(100_000);
        assert!(check(&dump).is_none());
    }

    #[test]
    fn ignores_non_function_kinds() {
        let mut dump = function_dump(&code_lines(200));
        dump.declarations[0].kind = DeclarationKind::Type(TypeKind::Struct);
        assert!(check(&dump).is_none());
    }

    #[test]
    fn from_config_reads_thresholds() {
        let config = Config::parse("[rules.function-body-length]\nwarning = 5\n").unwrap();
        let rule = FunctionBodyLength::from_config(&config).unwrap();
        assert_eq!(rule.levels().limit(Severity::Warning), Some(5));
        assert_eq!(rule.levels().limit(Severity::Error), Some(100));
        assert_eq!(rule.thresholds().as_deref(), Some("warning > 5, error > 100"));
    }
}
