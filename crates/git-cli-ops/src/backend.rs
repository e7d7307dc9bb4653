use crate::{GitCliOpsError, Revision, ScratchArtifacts};
use async_trait::async_trait;
use std::path::Path;

/// The narrow set of version-control operations the record store needs.
///
/// Every method receives the working directory explicitly; implementations
/// hold no per-repository state. [`GitCliBackend`](crate::GitCliBackend)
/// drives the real `git`/`patch` executables, tests substitute an in-memory
/// fake.
#[async_trait]
pub trait VersionControlBackend: Send + Sync {
    /// Name of the metadata directory whose presence marks an initialized
    /// repository (`.git` for git).
    fn metadata_dir_name(&self) -> &str {
        ".git"
    }

    /// Initialize an empty repository in `repo_dir`, which must exist.
    async fn init(&self, repo_dir: &Path) -> Result<(), GitCliOpsError>;

    /// Stage the working-tree file `id`.
    async fn stage(&self, repo_dir: &Path, id: &str) -> Result<(), GitCliOpsError>;

    /// Commit the staged index and return the new revision.
    async fn commit(&self, repo_dir: &Path, message: &str) -> Result<Revision, GitCliOpsError>;

    /// Rename a tracked file, staging both sides of the move.
    async fn rename(&self, repo_dir: &Path, old_id: &str, new_id: &str)
        -> Result<(), GitCliOpsError>;

    /// All revisions touching `id` across every ref, newest first.
    async fn revisions_for_id(
        &self,
        repo_dir: &Path,
        id: &str,
    ) -> Result<Vec<Revision>, GitCliOpsError>;

    /// Whether `id` is part of the tree recorded at `revision`.
    /// Unknown revisions are [`GitCliOpsError::RevisionNotFound`].
    async fn exists_at(
        &self,
        repo_dir: &Path,
        id: &str,
        revision: &Revision,
    ) -> Result<bool, GitCliOpsError>;

    /// Patch text from `revision`'s content of `id` to the working copy.
    /// Empty when both sides are identical.
    async fn diff_to_working_copy(
        &self,
        repo_dir: &Path,
        id: &str,
        revision: &Revision,
    ) -> Result<String, GitCliOpsError>;

    /// Apply the patch held in `artifacts` in reverse to the working copy of
    /// `id` and return the reconstructed content. The working copy itself is
    /// left untouched.
    async fn apply_reverse_patch(
        &self,
        repo_dir: &Path,
        id: &str,
        artifacts: &ScratchArtifacts,
    ) -> Result<String, GitCliOpsError>;
}
