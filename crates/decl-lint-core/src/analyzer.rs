//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox};
use crate::syntax::SyntaxDump;
use crate::types::{LintResult, Violation};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a syntax dump.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the dump that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Worker pool could not be created.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
    fail_on_parse_error: Option<bool>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds several boxed rules to the analyzer.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on unreadable dumps (default: from config, else false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = Some(fail);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured worker pool cannot be created.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        let fail_on_parse_error = self
            .fail_on_parse_error
            .unwrap_or(config.analyzer.fail_on_parse_error);

        let pool = match config.analyzer.parallelism {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?,
            ),
            None => None,
        };

        Ok(Analyzer {
            rules: self.rules,
            config,
            fail_on_parse_error,
            pool,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance. Files are evaluated
/// in parallel; rules and configuration are only ever read.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    config: Config,
    fail_on_parse_error: bool,
    pool: Option<rayon::ThreadPool>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Loads syntax dumps from disk.
    ///
    /// Dumps that cannot be read or parsed are skipped with a warning unless
    /// the analyzer was configured to fail on parse errors.
    ///
    /// # Errors
    ///
    /// Returns an error if a dump cannot be loaded and parse failures are fatal.
    pub fn load_dumps(&self, paths: &[PathBuf]) -> Result<Vec<SyntaxDump>, AnalyzerError> {
        let mut dumps = Vec::with_capacity(paths.len());
        for path in paths {
            match SyntaxDump::from_file(path) {
                Ok(dump) => dumps.push(dump),
                Err(e) if !self.fail_on_parse_error => {
                    warn!("Skipping {}: {}", path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(dumps)
    }

    /// Loads syntax dumps from disk and analyzes them.
    ///
    /// # Errors
    ///
    /// See [`Analyzer::load_dumps`].
    pub fn analyze_paths(&self, paths: &[PathBuf]) -> Result<LintResult, AnalyzerError> {
        Ok(self.analyze(&self.load_dumps(paths)?))
    }

    /// Analyzes already-loaded syntax dumps and returns the results.
    #[must_use]
    pub fn analyze(&self, dumps: &[SyntaxDump]) -> LintResult {
        info!(
            "Starting analysis of {} files with {} rules",
            dumps.len(),
            self.rules.len()
        );

        let run = || -> Vec<Violation> {
            dumps
                .par_iter()
                .flat_map_iter(|dump| self.analyze_file(dump))
                .collect()
        };
        let mut violations = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        // Sort violations by file, then line
        violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
                .then(a.code.cmp(&b.code))
        });

        let result = LintResult {
            violations,
            files_checked: dumps.len(),
        };

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        result
    }

    /// Runs every enabled rule over every declaration of one file.
    #[must_use]
    pub fn analyze_file(&self, dump: &SyntaxDump) -> Vec<Violation> {
        debug!("Analyzing: {}", dump.path.display());

        let ctx = FileContext::new(dump);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = dump
                .declarations
                .iter()
                .filter_map(|decl| rule.check(&ctx, decl))
                .collect();
            violations.extend(self.apply_severity_override(rule.name(), rule_violations));
        }

        violations
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }
}

/// Discovers syntax dump files under `path`.
///
/// A file path is returned as-is; a directory is searched recursively for
/// `*.json` files.
///
/// # Errors
///
/// Returns an error if the directory cannot be walked.
pub fn discover_dumps(path: &Path) -> Result<Vec<PathBuf>, AnalyzerError> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let pattern = format!("{}/**/*.json", path.display());
    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let file = entry.map_err(|e| AnalyzerError::Io(e.into_error()))?;
        debug!("Found dump: {}", file.display());
        files.push(file);
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{DeclarationKind, DeclarationRecord, SyntaxToken, TokenClass, TypeKind};
    use crate::types::Severity;

    /// Flags every declaration named `Bad`.
    struct NoBadNames;

    impl Rule for NoBadNames {
        fn name(&self) -> &'static str {
            "no-bad-names"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn check(&self, ctx: &FileContext, decl: &DeclarationRecord) -> Option<Violation> {
            if decl.name.as_deref() != Some("Bad") {
                return None;
            }
            Some(Violation::new(
                self.code(),
                self.name(),
                Severity::Error,
                ctx.location_for(decl.offset)?,
                "bad name",
            ))
        }
    }

    fn dump(path: &str, names: &[(&str, usize)]) -> SyntaxDump {
        SyntaxDump {
            path: PathBuf::from(path),
            contents: "struct Bad {}\nstruct Ok {}\nstruct Bad {}\n".to_string(),
            tokens: Vec::new(),
            declarations: names
                .iter()
                .map(|(name, offset)| {
                    DeclarationRecord::new(DeclarationKind::Type(TypeKind::Struct), *offset)
                        .named(*name)
                })
                .collect(),
        }
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .rule(NoBadNames)
            .build()
            .expect("Failed to build analyzer");
        assert_eq!(analyzer.rule_count(), 1);
    }

    #[test]
    fn collects_and_sorts_violations() {
        let analyzer = Analyzer::builder().rule(NoBadNames).build().unwrap();
        let dumps = [
            dump("b.swift", &[("Bad", 27), ("Bad", 0)]),
            dump("a.swift", &[("Ok", 14), ("Bad", 0)]),
        ];

        let result = analyzer.analyze(&dumps);
        assert_eq!(result.files_checked, 2);
        let found: Vec<(String, usize)> = result
            .violations
            .iter()
            .map(|v| (v.location.file.display().to_string(), v.location.line))
            .collect();
        assert_eq!(
            found,
            vec![
                ("a.swift".to_string(), 1),
                ("b.swift".to_string(), 1),
                ("b.swift".to_string(), 3),
            ]
        );
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let config = Config::parse("[rules.no-bad-names]\nenabled = false\n").unwrap();
        let analyzer = Analyzer::builder()
            .rule(NoBadNames)
            .config(config)
            .build()
            .unwrap();
        let result = analyzer.analyze(&[dump("a.swift", &[("Bad", 0)])]);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn severity_override_applies() {
        let config = Config::parse("[rules.no-bad-names]\nseverity = \"warning\"\n").unwrap();
        let analyzer = Analyzer::builder()
            .rule(NoBadNames)
            .config(config)
            .build()
            .unwrap();
        let result = analyzer.analyze(&[dump("a.swift", &[("Bad", 0)])]);
        assert_eq!(result.violations[0].severity, Severity::Warning);
    }

    #[test]
    fn bounded_parallelism() {
        let config = Config::parse("[analyzer]\nparallelism = 2\n").unwrap();
        let analyzer = Analyzer::builder()
            .rule(NoBadNames)
            .config(config)
            .build()
            .unwrap();
        let dumps: Vec<_> = (0..8)
            .map(|i| dump(&format!("f{i}.swift"), &[("Bad", 0)]))
            .collect();
        assert_eq!(analyzer.analyze(&dumps).violations.len(), 8);
    }

    #[test]
    fn overflowing_token_offsets_do_not_abort_analysis() {
        let analyzer = Analyzer::builder().rule(NoBadNames).build().unwrap();
        let mut broken = dump("a.swift", &[("Bad", 0)]);
        broken.tokens = vec![SyntaxToken::new(usize::MAX, 2, TokenClass::Comment)];
        let dumps = [broken, dump("b.swift", &[("Bad", 0)])];

        assert_eq!(analyzer.analyze(&dumps).violations.len(), 2);
    }

    #[test]
    fn missing_dump_is_skipped_by_default() {
        let analyzer = Analyzer::builder().rule(NoBadNames).build().unwrap();
        let result = analyzer
            .analyze_paths(&[PathBuf::from("/nonexistent/dump.json")])
            .expect("missing dump is skipped");
        assert_eq!(result.files_checked, 0);
    }

    #[test]
    fn missing_dump_fails_when_strict() {
        let analyzer = Analyzer::builder()
            .rule(NoBadNames)
            .fail_on_parse_error(true)
            .build()
            .unwrap();
        assert!(analyzer
            .analyze_paths(&[PathBuf::from("/nonexistent/dump.json")])
            .is_err());
    }

    #[test]
    fn discover_returns_plain_file_unchanged() {
        let files = discover_dumps(Path::new("out/Model.json")).unwrap();
        assert_eq!(files, vec![PathBuf::from("out/Model.json")]);
    }
}
