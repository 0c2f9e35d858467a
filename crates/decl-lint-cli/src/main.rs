//! decl-lint CLI tool.
//!
//! Usage:
//! ```bash
//! decl-lint check [OPTIONS] [DUMPS]...
//! decl-lint list-rules
//! decl-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use decl_lint_core::Severity;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::project::ProjectSettings;

mod commands;
mod project;

/// Size and naming linter for declarations in syntax dumps
#[derive(Parser)]
#[command(name = "decl-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks over syntax dumps
    Check {
        /// Dump files or directories of `*.json` dumps
        /// (default: `[analyzer] dump_dirs`, else the current directory)
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules by name or code (comma-separated)
        #[arg(long)]
        rules: Option<String>,

        /// Lowest severity that fails the run (overrides config `fail_on`)
        #[arg(long)]
        fail_on: Option<Severity>,
    },

    /// List rules with their effective configuration
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Diagnostics rendered against the source text.
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            paths,
            format,
            rules,
            fail_on,
        } => {
            let settings = load_settings(cli.config.as_deref())?;
            let code = commands::check::run(&paths, format, rules, fail_on, settings)?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Commands::ListRules => {
            let settings = load_settings(cli.config.as_deref())?;
            commands::list_rules::run(&settings)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}

fn load_settings(explicit: Option<&Path>) -> Result<ProjectSettings> {
    let project_dir = std::env::current_dir()?;
    ProjectSettings::load(&project_dir, explicit)
}
