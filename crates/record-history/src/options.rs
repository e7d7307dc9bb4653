use crate::{RecordHistoryError, RecordHistoryResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Static options a [`Repository`](crate::Repository) is opened with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryOptions {
    /// Working directory holding one file per record.
    pub root_path: PathBuf,
    /// Directory for transient reconstruction artifacts.
    pub scratch_path: PathBuf,
    /// Create the directory and backend repository when missing.
    #[serde(default)]
    pub init_repo_if_empty: bool,
}

impl RepositoryOptions {
    pub fn new(root_path: impl Into<PathBuf>, scratch_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
            scratch_path: scratch_path.into(),
            init_repo_if_empty: true,
        }
    }

    pub fn init_repo_if_empty(mut self, enabled: bool) -> Self {
        self.init_repo_if_empty = enabled;
        self
    }

    /// Rejects empty paths and a scratch directory inside (or equal to) the
    /// repository root.
    pub fn validate(&self) -> RecordHistoryResult<()> {
        if self.root_path.as_os_str().is_empty() {
            return Err(RecordHistoryError::Configuration(
                "repository root path is empty".to_string(),
            ));
        }
        if self.scratch_path.as_os_str().is_empty() {
            return Err(RecordHistoryError::Configuration(
                "scratch path is empty".to_string(),
            ));
        }
        if self.scratch_path.starts_with(&self.root_path) {
            return Err(RecordHistoryError::Configuration(format!(
                "scratch path {} must be outside the repository root {}",
                self.scratch_path.display(),
                self.root_path.display()
            )));
        }
        Ok(())
    }
}
