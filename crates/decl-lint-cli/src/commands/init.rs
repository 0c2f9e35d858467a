//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# decl-lint configuration

# Lowest severity that makes `decl-lint check` exit with status 1
# fail_on = "error"

[analyzer]
# Abort when a syntax dump cannot be read or parsed
fail_on_parse_error = false

# Maximum number of dumps evaluated in parallel (default: all cores)
# parallelism = 4

# Dumps checked when `decl-lint check` is given no paths, relative to this file
# dump_dirs = ["build/syntax-dumps"]

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.function-body-length]
enabled = true
warning = 40
error = 100

[rules.type-body-length]
enabled = true
warning = 200
error = 350

[rules.type-name]
enabled = true
min_length = { warning = 3, error = 0 }
max_length = { warning = 40, error = 1000 }
# excluded = ["ID"]

[rules.variable-name]
enabled = true
# severity = "warning"  # Report every violation at this severity
min_length = { warning = 3, error = 2 }
max_length = { warning = 40, error = 60 }
# excluded = ["id", "x", "y"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("decl-lint.toml"), force)?;

    println!("Created decl-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit decl-lint.toml to configure rules");
    println!("  2. Run: decl-lint check <dumps>");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use decl_lint_core::{Config, Severity};
    use tempfile::TempDir;

    #[test]
    fn default_config_parses_and_builds_rules() {
        let config = Config::parse(DEFAULT_CONFIG).expect("default config should parse");
        assert!(config.is_rule_enabled("type-name"));
        assert!(!config.analyzer.fail_on_parse_error);
        assert!(config.analyzer.dump_dirs.is_empty());

        let rules = decl_lint_rules::rules_from_config(&config).expect("rules should build");
        assert_eq!(rules.len(), 4);

        let rule = decl_lint_rules::FunctionBodyLength::from_config(&config).unwrap();
        assert_eq!(rule.levels().limit(Severity::Error), Some(100));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("decl-lint.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
