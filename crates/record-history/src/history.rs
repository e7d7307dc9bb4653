use crate::{RecordHistoryResult, Repository};
use git_cli_ops::Revision;

impl Repository {
    /// Lists every revision that touched `id` across all refs, newest first.
    ///
    /// Returns `Ok(None)` when no record file currently exists for `id`.
    pub async fn list_revs(&self, id: &str) -> RecordHistoryResult<Option<Vec<Revision>>> {
        self.ensure_ready()?;
        let _guard = self.lock.lock().await;

        if !self.id_exists(id) {
            tracing::debug!(id, "list_revs on unknown record");
            return Ok(None);
        }

        let revisions = self.backend.revisions_for_id(&self.root, id).await?;
        tracing::debug!(id, count = revisions.len(), "listed record revisions");
        Ok(Some(revisions))
    }
}
