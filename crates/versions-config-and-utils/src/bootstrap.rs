//! Wiring from configuration to an open record repository.

use crate::{Config, CoreResult};
use git_cli_ops::GitCliBackend;
use record_history::Repository;
use std::sync::Arc;

/// Validates `config` and opens the record repository it describes,
/// backed by the `git` and `patch` executables.
pub async fn open_repository(config: &Config) -> CoreResult<Repository> {
    config.validate()?;

    let backend = GitCliBackend::new(&config.git_options());
    let repo = Repository::open(config.repository_options(), Arc::new(backend)).await?;

    tracing::info!(
        root = %repo.root_path().display(),
        scratch = %repo.scratch_path().display(),
        ready = repo.is_ready(),
        "record repository opened"
    );
    Ok(repo)
}
