//! File system paths for the record store.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Central log filename under the logs directory.
const LOG_FILE_NAME: &str = "dev.jsonl";

/// Manages file system paths for the record store.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory (~/.versions)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.versions`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".versions"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.versions).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (~/.versions/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Default repository root (~/.versions/records).
    pub fn records_dir(&self) -> PathBuf {
        self.base_dir.join("records")
    }

    /// Default scratch directory for reconstruction artifacts (~/.versions/patches).
    pub fn patches_dir(&self) -> PathBuf {
        self.base_dir.join("patches")
    }

    /// Get the logs directory (~/.versions/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the central log file path (~/.versions/logs/dev.jsonl).
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE_NAME)
    }

    /// Ensure the base and logs directories exist.
    ///
    /// The records and patches directories are left to the repository,
    /// which creates them only when automatic initialization is enabled.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}
