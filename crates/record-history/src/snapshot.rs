//! Historical snapshot reconstruction.
//!
//! The backend diffs the requested revision against the working copy; the
//! resulting patch is applied in reverse to the working copy inside the
//! scratch directory. The working tree itself is never modified.
//!
//! A record has no content at a revision whose tree does not hold it, for
//! example before the record was created or renamed to its current id.

use crate::{RecordHistoryError, RecordHistoryResult, Repository};
use git_cli_ops::{Revision, ScratchArtifacts};

impl Repository {
    /// Returns the content of record `id` as of `revision`.
    ///
    /// Returns `Ok(None)` when the record does not currently exist, when
    /// `revision` is malformed or unknown to the backend, or when the record
    /// was absent at `revision`. Failures to compute or apply the
    /// patch are [`RecordHistoryError::Reconstruction`], never placeholder
    /// content.
    pub async fn get_rev(
        &self,
        id: &str,
        revision: &Revision,
    ) -> RecordHistoryResult<Option<String>> {
        self.ensure_ready()?;
        let _guard = self.lock.lock().await;
        self.reconstruct(id, revision).await
    }

    /// Reconstruction without taking the root lock; callers hold it.
    pub(crate) async fn reconstruct(
        &self,
        id: &str,
        revision: &Revision,
    ) -> RecordHistoryResult<Option<String>> {
        if !self.id_exists(id) {
            return Ok(None);
        }

        let reconstruction_error = |source| RecordHistoryError::Reconstruction {
            id: id.to_string(),
            revision: revision.clone(),
            source,
        };

        if !revision.is_well_formed() {
            tracing::debug!(id, revision = %revision, "malformed revision");
            return Ok(None);
        }

        match self.backend.exists_at(&self.root, id, revision).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(id, revision = %revision, "record absent at revision");
                return Ok(None);
            }
            Err(err) if err.is_revision_not_found() => {
                tracing::debug!(id, revision = %revision, "unknown revision");
                return Ok(None);
            }
            Err(err) => return Err(reconstruction_error(err)),
        }

        let patch = match self
            .backend
            .diff_to_working_copy(&self.root, id, revision)
            .await
        {
            Ok(patch) => patch,
            Err(err) if err.is_revision_not_found() => {
                tracing::debug!(id, revision = %revision, "unknown revision");
                return Ok(None);
            }
            Err(err) => return Err(reconstruction_error(err)),
        };

        if patch.is_empty() {
            tracing::debug!(id, revision = %revision, "working copy matches revision");
            let content = tokio::fs::read_to_string(self.record_path(id)).await?;
            return Ok(Some(content));
        }

        let artifacts = ScratchArtifacts::acquire(&self.scratch, id, revision.as_str())
            .map_err(|e| reconstruction_error(e.into()))?;
        artifacts
            .write_patch(&patch)
            .map_err(|e| reconstruction_error(e.into()))?;

        let content = self
            .backend
            .apply_reverse_patch(&self.root, id, &artifacts)
            .await
            .map_err(reconstruction_error)?;

        tracing::debug!(id, revision = %revision, "reconstructed historical snapshot");
        Ok(Some(content))
    }
}
