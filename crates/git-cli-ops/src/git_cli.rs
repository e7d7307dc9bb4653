use crate::command_runner::{CommandRunner, Tool};
use crate::{
    GitCliOpsError, GitInvocationOptions, Revision, ScratchArtifacts, VersionControlBackend,
};
use async_trait::async_trait;
use std::path::Path;

/// [`VersionControlBackend`] that shells out to `git` and `patch`.
#[derive(Debug, Clone)]
pub struct GitCliBackend {
    git: CommandRunner,
    patch: CommandRunner,
    timeout_secs: u64,
}

impl Default for GitCliBackend {
    fn default() -> Self {
        Self::new(&GitInvocationOptions::default())
    }
}

impl GitCliBackend {
    pub fn new(options: &GitInvocationOptions) -> Self {
        let git = CommandRunner::new(Tool::Git, options.executable.as_deref())
            .with_env("GIT_AUTHOR_NAME", options.author_name.as_str())
            .with_env("GIT_AUTHOR_EMAIL", options.author_email.as_str())
            .with_env("GIT_COMMITTER_NAME", options.author_name.as_str())
            .with_env("GIT_COMMITTER_EMAIL", options.author_email.as_str());
        let patch = CommandRunner::new(Tool::Patch, options.patch_executable.as_deref());

        Self {
            git,
            patch,
            timeout_secs: options.timeout_secs,
        }
    }

    async fn git(&self, repo_dir: &Path, args: &[&str]) -> Result<String, GitCliOpsError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let output = self.git.run(&args, repo_dir, self.timeout_secs).await?;
        Ok(output.stdout)
    }
}

/// Refuses revisions git would read as an option or a second argument.
fn checked_revision(revision: &Revision) -> Result<&str, GitCliOpsError> {
    if revision.is_well_formed() {
        Ok(revision.as_str())
    } else {
        Err(GitCliOpsError::RevisionNotFound {
            message: format!("malformed revision {:?}", revision.as_str()),
        })
    }
}

#[async_trait]
impl VersionControlBackend for GitCliBackend {
    async fn init(&self, repo_dir: &Path) -> Result<(), GitCliOpsError> {
        self.git(repo_dir, &["init", "--quiet"]).await?;
        Ok(())
    }

    async fn stage(&self, repo_dir: &Path, id: &str) -> Result<(), GitCliOpsError> {
        self.git(repo_dir, &["add", "--", id]).await?;
        Ok(())
    }

    async fn commit(&self, repo_dir: &Path, message: &str) -> Result<Revision, GitCliOpsError> {
        self.git(
            repo_dir,
            &["-c", "commit.gpgsign=false", "commit", "--quiet", "-m", message],
        )
        .await?;

        let head = self.git(repo_dir, &["rev-parse", "HEAD"]).await?;
        let head = head.trim();
        if head.is_empty() {
            return Err(GitCliOpsError::InvalidOutput {
                message: "git rev-parse HEAD printed nothing after commit".to_string(),
            });
        }
        Ok(Revision::new(head))
    }

    async fn rename(
        &self,
        repo_dir: &Path,
        old_id: &str,
        new_id: &str,
    ) -> Result<(), GitCliOpsError> {
        self.git(repo_dir, &["mv", "--", old_id, new_id]).await?;
        Ok(())
    }

    async fn revisions_for_id(
        &self,
        repo_dir: &Path,
        id: &str,
    ) -> Result<Vec<Revision>, GitCliOpsError> {
        let stdout = self.git(repo_dir, &["rev-list", "--all", "--", id]).await?;
        Ok(parse_rev_list(&stdout))
    }

    async fn exists_at(
        &self,
        repo_dir: &Path,
        id: &str,
        revision: &Revision,
    ) -> Result<bool, GitCliOpsError> {
        let tree = format!("{}^{{commit}}", checked_revision(revision)?);
        let stdout = self
            .git(repo_dir, &["ls-tree", "-z", "--name-only", &tree, "--", id])
            .await?;
        Ok(stdout.split('\0').any(|name| name == id))
    }

    async fn diff_to_working_copy(
        &self,
        repo_dir: &Path,
        id: &str,
        revision: &Revision,
    ) -> Result<String, GitCliOpsError> {
        let revision = checked_revision(revision)?;
        self.git(
            repo_dir,
            &[
                "diff",
                "--no-color",
                "--no-ext-diff",
                "-p",
                revision,
                "--",
                id,
            ],
        )
        .await
    }

    async fn apply_reverse_patch(
        &self,
        repo_dir: &Path,
        id: &str,
        artifacts: &ScratchArtifacts,
    ) -> Result<String, GitCliOpsError> {
        let args = vec![
            "-R".to_string(),
            "-f".to_string(),
            "-s".to_string(),
            "-i".to_string(),
            artifacts.patch_path().display().to_string(),
            "-o".to_string(),
            artifacts.patched_path().display().to_string(),
            "-r".to_string(),
            artifacts.reject_path().display().to_string(),
            id.to_string(),
        ];
        self.patch.run(&args, repo_dir, self.timeout_secs).await?;

        artifacts
            .read_patched()
            .map_err(|err| GitCliOpsError::InvalidOutput {
                message: format!("failed to read reconstructed content: {err}"),
            })
    }
}

fn parse_rev_list(stdout: &str) -> Vec<Revision> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Revision::new)
        .collect()
}
