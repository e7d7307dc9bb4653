#![allow(dead_code)]

use git_cli_ops::GitCliBackend;
use record_history::{Repository, RepositoryOptions, RootLocks};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;
use tempfile::TempDir;

/// Whether `git` and `patch` can both be run on this machine.
///
/// Tests that need the real tools return early when this is false.
pub fn tools_available() -> bool {
    ["git", "patch"].iter().all(|tool| {
        Command::new(tool)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    })
}

/// A repository backed by the real git CLI, rooted in a temp directory.
pub struct GitRepo {
    pub repo: Repository,
    pub root: PathBuf,
    pub scratch: PathBuf,
    _dir: TempDir,
}

impl GitRepo {
    pub fn record_file(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    pub fn scratch_files(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(&self.scratch) {
            Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Open a fresh repository with automatic initialization enabled.
pub async fn open_git_repo() -> GitRepo {
    let dir = TempDir::new().expect("failed to create temp dir");
    let root = dir.path().join("records");
    let scratch = dir.path().join("patches");

    let repo = Repository::open_with_locks(
        RepositoryOptions::new(&root, &scratch),
        Arc::new(GitCliBackend::default()),
        &RootLocks::new(),
    )
    .await
    .expect("failed to open repository");

    GitRepo {
        repo,
        root,
        scratch,
        _dir: dir,
    }
}
