use crate::deep_diff::{deep_diff, DiffResult};
use crate::{RecordHistoryError, RecordHistoryResult, Repository};
use git_cli_ops::Revision;
use serde_json::Value;

impl Repository {
    /// Structural diff of record `id` between `from` and `to`.
    ///
    /// Both snapshots are reconstructed under one hold of the root lock
    /// before anything is compared. Returns `Ok(None)` when the record or
    /// either revision does not exist, or the record is absent at either
    /// revision; any reconstruction or parse failure
    /// fails the whole call.
    pub async fn diff(
        &self,
        id: &str,
        from: &Revision,
        to: &Revision,
    ) -> RecordHistoryResult<Option<DiffResult>> {
        self.ensure_ready()?;
        let _guard = self.lock.lock().await;

        if !self.id_exists(id) {
            return Ok(None);
        }

        let Some(old_content) = self.reconstruct(id, from).await? else {
            return Ok(None);
        };
        let Some(new_content) = self.reconstruct(id, to).await? else {
            return Ok(None);
        };

        let old = parse_snapshot(id, from, &old_content)?;
        let new = parse_snapshot(id, to, &new_content)?;

        let diff = deep_diff(&old, &new);
        tracing::debug!(
            id,
            from = %from,
            to = %to,
            added = diff.added.len(),
            removed = diff.removed.len(),
            changed = diff.changed.len(),
            "diffed record revisions"
        );
        Ok(Some(diff))
    }
}

fn parse_snapshot(id: &str, revision: &Revision, content: &str) -> RecordHistoryResult<Value> {
    serde_json::from_str(content).map_err(|source| RecordHistoryError::Parse {
        id: id.to_string(),
        revision: revision.clone(),
        source,
    })
}
