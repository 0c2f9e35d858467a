//! Per-run project settings: the configuration and where dumps are searched.
//!
//! The configuration file is the first match of:
//!
//! 1. `--config <path>`
//! 2. `decl-lint.toml`, then `.decl-lint.toml`, in the working directory
//! 3. `config.toml` in `$DECL_LINT_CONFIG_DIR`, else in `~/.decl-lint/`
//!
//! Without one the built-in defaults apply.
//!
//! Dump roots are the paths given on the command line, else the
//! `[analyzer] dump_dirs` entries, else the working directory.

use anyhow::{Context, Result};
use decl_lint_core::Config;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PROJECT_FILES: [&str; 2] = ["decl-lint.toml", ".decl-lint.toml"];
const GLOBAL_FILE: &str = "config.toml";
const CONFIG_DIR_ENV: &str = "DECL_LINT_CONFIG_DIR";

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`; not required to exist until loaded.
    Explicit(PathBuf),
    /// Found in the working directory.
    Project(PathBuf),
    /// Found in the per-user config directory.
    Global(PathBuf),
    /// No file; built-in defaults.
    Default,
}

impl ConfigSource {
    fn locate(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::Explicit(path.to_path_buf());
        }
        PROJECT_FILES
            .iter()
            .map(|name| project_dir.join(name))
            .find(|candidate| candidate.is_file())
            .map(Self::Project)
            .or_else(|| {
                global_dir
                    .map(|dir| dir.join(GLOBAL_FILE))
                    .filter(|candidate| candidate.is_file())
                    .map(Self::Global)
            })
            .unwrap_or(Self::Default)
    }

    /// Returns the configuration file, if one was found.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Directory that relative `dump_dirs` entries are joined to.
    ///
    /// A global config is shared between projects, so its entries resolve
    /// against the working directory like the default does.
    fn anchor<'a>(&'a self, project_dir: &'a Path) -> &'a Path {
        match self {
            Self::Explicit(p) | Self::Project(p) => p
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(project_dir),
            Self::Global(_) | Self::Default => project_dir,
        }
    }
}

/// Configuration for one run, with the location it was loaded from.
#[derive(Debug)]
pub struct ProjectSettings {
    /// Where `config` came from.
    pub source: ConfigSource,
    /// Parsed configuration.
    pub config: Config,
    project_dir: PathBuf,
}

impl ProjectSettings {
    /// Locates and parses the configuration for `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the located file cannot be read or parsed.
    pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let global_dir = global_config_dir();
        Self::load_from(project_dir, explicit, global_dir.as_deref())
    }

    fn load_from(
        project_dir: &Path,
        explicit: Option<&Path>,
        global_dir: Option<&Path>,
    ) -> Result<Self> {
        let source = ConfigSource::locate(project_dir, explicit, global_dir);
        let config = match &source {
            ConfigSource::Default => {
                debug!("No config file found, using defaults");
                Config::default()
            }
            located => {
                let path = located.path().context("located config has no path")?;
                if matches!(located, ConfigSource::Global(_)) {
                    info!("Using global config: {}", path.display());
                } else {
                    debug!("Using config: {}", path.display());
                }
                Config::from_file(path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?
            }
        };

        Ok(Self {
            source,
            config,
            project_dir: project_dir.to_path_buf(),
        })
    }

    /// Files or directories to search for syntax dumps.
    #[must_use]
    pub fn dump_roots(&self, cli_paths: &[PathBuf]) -> Vec<PathBuf> {
        if !cli_paths.is_empty() {
            return cli_paths.to_vec();
        }
        let configured = &self.config.analyzer.dump_dirs;
        if configured.is_empty() {
            return vec![self.project_dir.clone()];
        }
        let anchor = self.source.anchor(&self.project_dir);
        configured.iter().map(|dir| anchor.join(dir)).collect()
    }
}

/// Per-user config directory: `$DECL_LINT_CONFIG_DIR`, else `~/.decl-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => home::home_dir().map(|h| h.join(".decl-lint")),
    }
}
