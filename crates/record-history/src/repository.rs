//! Repository lifecycle: probing, optional initialization, readiness.

use crate::lock::{RootLock, RootLocks};
use crate::record_id::validate_record_id;
use crate::{RecordHistoryError, RecordHistoryResult, RepositoryOptions};
use git_cli_ops::VersionControlBackend;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Readiness of a repository handle, fixed when the handle is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RepositoryStatus {
    /// Directory and backend repository both exist.
    Ready,
    /// Something is missing and automatic initialization is disabled.
    Missing,
    /// Creating the directory or the backend repository failed.
    InitFailed { reason: String },
}

/// Handle on one record repository.
///
/// Owns the working-directory binding for its backend. Every operation
/// takes the per-root lock for its whole duration.
pub struct Repository {
    pub(crate) root: PathBuf,
    pub(crate) scratch: PathBuf,
    pub(crate) backend: Arc<dyn VersionControlBackend>,
    pub(crate) lock: RootLock,
    dir_exists: bool,
    repo_exists: bool,
    status: RepositoryStatus,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("root", &self.root)
            .field("scratch", &self.scratch)
            .field("dir_exists", &self.dir_exists)
            .field("repo_exists", &self.repo_exists)
            .field("status", &self.status)
            .finish()
    }
}

impl Repository {
    /// Opens the repository at `options.root_path` using the process-wide
    /// lock registry.
    ///
    /// Only invalid options are returned as errors. A repository that is
    /// missing or fails to initialize still yields a handle; its operations
    /// then short-circuit with [`RecordHistoryError::RepositoryUnavailable`]
    /// or [`RecordHistoryError::Initialization`].
    pub async fn open(
        options: RepositoryOptions,
        backend: Arc<dyn VersionControlBackend>,
    ) -> RecordHistoryResult<Self> {
        Self::open_with_locks(options, backend, RootLocks::shared()).await
    }

    /// Like [`Repository::open`] with an explicit lock registry.
    pub async fn open_with_locks(
        options: RepositoryOptions,
        backend: Arc<dyn VersionControlBackend>,
        locks: &RootLocks,
    ) -> RecordHistoryResult<Self> {
        options.validate()?;
        let RepositoryOptions {
            root_path: root,
            scratch_path: scratch,
            init_repo_if_empty,
        } = options;

        let mut dir_exists = root.is_dir();
        let mut repo_exists = dir_exists && root.join(backend.metadata_dir_name()).exists();

        let status = if dir_exists && repo_exists {
            tracing::debug!(root = %root.display(), "repository already initialized");
            RepositoryStatus::Ready
        } else if init_repo_if_empty {
            match initialize(&root, dir_exists, backend.as_ref()).await {
                Ok(()) => {
                    dir_exists = true;
                    repo_exists = true;
                    tracing::info!(root = %root.display(), "initialized record repository");
                    RepositoryStatus::Ready
                }
                Err(reason) => {
                    dir_exists = root.is_dir();
                    tracing::error!(
                        root = %root.display(),
                        reason = %reason,
                        "record repository could not be initialized"
                    );
                    RepositoryStatus::InitFailed { reason }
                }
            }
        } else {
            tracing::warn!(
                root = %root.display(),
                dir_exists,
                repo_exists,
                "repository does not exist and automatic initialization is disabled"
            );
            RepositoryStatus::Missing
        };

        let lock = locks.for_root(&root);

        Ok(Self {
            root,
            scratch,
            backend,
            lock,
            dir_exists,
            repo_exists,
            status,
        })
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    pub fn scratch_path(&self) -> &Path {
        &self.scratch
    }

    pub fn dir_exists(&self) -> bool {
        self.dir_exists
    }

    pub fn repo_exists(&self) -> bool {
        self.repo_exists
    }

    pub fn status(&self) -> &RepositoryStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == RepositoryStatus::Ready
    }

    /// Whether a record file currently exists for `id`. Invalid ids never
    /// exist.
    pub fn id_exists(&self, id: &str) -> bool {
        validate_record_id(id).is_ok() && self.record_path(id).is_file()
    }

    pub(crate) fn record_path(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    /// Short-circuit guard run before any backend call.
    pub(crate) fn ensure_ready(&self) -> RecordHistoryResult<()> {
        match &self.status {
            RepositoryStatus::Ready => Ok(()),
            RepositoryStatus::Missing => {
                tracing::warn!(
                    root = %self.root.display(),
                    "operation refused: repository was not initialized"
                );
                Err(RecordHistoryError::RepositoryUnavailable {
                    root: self.root.clone(),
                    reason: "repository does not exist and automatic initialization is disabled"
                        .to_string(),
                })
            }
            RepositoryStatus::InitFailed { reason } => {
                Err(RecordHistoryError::Initialization {
                    root: self.root.clone(),
                    reason: reason.clone(),
                })
            }
        }
    }
}

async fn initialize(
    root: &Path,
    dir_exists: bool,
    backend: &dyn VersionControlBackend,
) -> Result<(), String> {
    if !dir_exists {
        tokio::fs::create_dir_all(root)
            .await
            .map_err(|e| format!("unable to create directory: {e}"))?;
    }

    backend
        .init(root)
        .await
        .map_err(|e| format!("unable to initialize backend repository: {e}"))
}
