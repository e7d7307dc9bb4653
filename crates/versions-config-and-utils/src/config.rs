//! Configuration management for the record store.

use crate::{CoreError, CoreResult, Paths};
use git_cli_ops::GitInvocationOptions;
use record_history::RepositoryOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Main configuration.
///
/// Directory fields left empty in a config file are filled from [`Paths`]
/// when loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Repository root holding one file per record.
    #[serde(default)]
    pub repo_dir: PathBuf,
    /// Scratch directory for reconstruction artifacts.
    #[serde(default)]
    pub patch_dir: PathBuf,
    /// Create the repository when it does not exist yet.
    #[serde(default = "default_init_repo_if_empty")]
    pub init_repo_if_empty: bool,
    /// How `git` and `patch` are located and invoked.
    #[serde(default)]
    pub git: GitInvocationOptions,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_init_repo_if_empty() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        match Paths::new() {
            Ok(paths) => Self::with_paths(&paths),
            Err(_) => Self::with_paths(&Paths::with_base_dir(PathBuf::from(".versions"))),
        }
    }
}

impl Config {
    /// Defaults with directories under the given paths.
    pub fn with_paths(paths: &Paths) -> Self {
        Self {
            log_level: default_log_level(),
            repo_dir: paths.records_dir(),
            patch_dir: paths.patches_dir(),
            init_repo_if_empty: default_init_repo_if_empty(),
            git: GitInvocationOptions::default(),
        }
    }

    /// Create a new Config with default values, then override from environment.
    pub fn new() -> Self {
        let mut config = Self::default();
        config.load_from_env();
        config
    }

    /// Load configuration from the config file under `paths`, falling back
    /// to defaults, then apply environment overrides.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::with_paths(paths)
        };

        if config.repo_dir.as_os_str().is_empty() {
            config.repo_dir = paths.records_dir();
        }
        if config.patch_dir.as_os_str().is_empty() {
            config.patch_dir = paths.patches_dir();
        }

        config.load_from_env();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.config_file(), content)?;
        Ok(())
    }

    /// Override configuration from environment variables.
    fn load_from_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(log_level) = lookup("VERSIONS_LOG_LEVEL") {
            self.log_level = log_level;
        }
        if let Some(dir) = lookup("VERSIONS_REPO_DIR").filter(|v| !v.trim().is_empty()) {
            self.repo_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("VERSIONS_PATCH_DIR").filter(|v| !v.trim().is_empty()) {
            self.patch_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup("VERSIONS_INIT_REPO_IF_EMPTY") {
            match parse_flag(&flag) {
                Some(enabled) => self.init_repo_if_empty = enabled,
                None => tracing::warn!(
                    value = %flag,
                    "ignoring unrecognized VERSIONS_INIT_REPO_IF_EMPTY value"
                ),
            }
        }
    }

    /// Checks the directory settings before anything touches the disk.
    pub fn validate(&self) -> CoreResult<()> {
        if self.repo_dir.as_os_str().is_empty() {
            return Err(CoreError::Config("repo_dir is empty".to_string()));
        }
        if self.patch_dir.as_os_str().is_empty() {
            return Err(CoreError::Config("patch_dir is empty".to_string()));
        }
        if self.repo_dir == self.patch_dir {
            return Err(CoreError::Config(
                "repo_dir and patch_dir must be different directories".to_string(),
            ));
        }
        if self.patch_dir.starts_with(&self.repo_dir) {
            return Err(CoreError::Config(format!(
                "patch_dir {} must not be inside repo_dir {}",
                self.patch_dir.display(),
                self.repo_dir.display()
            )));
        }
        Ok(())
    }

    /// Options the record repository is opened with.
    pub fn repository_options(&self) -> RepositoryOptions {
        RepositoryOptions::new(&self.repo_dir, &self.patch_dir)
            .init_repo_if_empty(self.init_repo_if_empty)
    }

    /// Options the git CLI backend is built with.
    pub fn git_options(&self) -> GitInvocationOptions {
        self.git.clone()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
