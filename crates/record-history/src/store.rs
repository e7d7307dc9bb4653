//! Write path: serialize, stage and commit, or rename and commit.

use crate::record_id::validate_record_id;
use crate::{RecordHistoryError, RecordHistoryResult, Repository};
use chrono::{SecondsFormat, Utc};
use git_cli_ops::Revision;
use serde::Serialize;
use serde_json::Value;

impl Repository {
    /// Stores `data` as the new content of record `id` and commits it.
    ///
    /// When `id_field` names a field of `data` whose value differs from
    /// `id`, the record file is instead renamed to that value and the rename
    /// is committed. The renamed file keeps its previously committed
    /// content; `data` is not written in that case.
    ///
    /// Each successful call yields exactly one new revision. If the commit
    /// fails after staging or renaming, [`RecordHistoryError::CommitFailed`]
    /// is returned and the working tree keeps the uncommitted change.
    pub async fn store<T>(
        &self,
        id: &str,
        data: &T,
        id_field: Option<&str>,
    ) -> RecordHistoryResult<Revision>
    where
        T: Serialize + ?Sized,
    {
        self.ensure_ready()?;
        validate_record_id(id)?;

        let _guard = self.lock.lock().await;

        match renamed_id(id, data, id_field)? {
            Some(new_id) => {
                validate_record_id(&new_id)?;
                tracing::debug!(id, new_id = %new_id, "renaming record");
                self.backend.rename(&self.root, id, &new_id).await?;
                self.commit_change(&new_id).await
            }
            None => {
                let content =
                    serde_json::to_string(data).map_err(|source| RecordHistoryError::Serialize {
                        id: id.to_string(),
                        source,
                    })?;
                tokio::fs::write(self.record_path(id), content).await?;
                self.backend.stage(&self.root, id).await?;
                self.commit_change(id).await
            }
        }
    }

    async fn commit_change(&self, id: &str) -> RecordHistoryResult<Revision> {
        let message = commit_message();
        match self.backend.commit(&self.root, &message).await {
            Ok(revision) => {
                tracing::info!(id, revision = %revision, "record committed");
                Ok(revision)
            }
            Err(source) => {
                tracing::warn!(
                    id,
                    root = %self.root.display(),
                    error = %source,
                    "commit failed, working tree left uncommitted"
                );
                Err(RecordHistoryError::CommitFailed {
                    id: id.to_string(),
                    source,
                })
            }
        }
    }
}

fn commit_message() -> String {
    format!(
        "Updated at {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// The id `data` asks to be renamed to, if any. Only non-empty strings and
/// numbers count as ids.
fn renamed_id<T>(id: &str, data: &T, id_field: Option<&str>) -> RecordHistoryResult<Option<String>>
where
    T: Serialize + ?Sized,
{
    let Some(field) = id_field else {
        return Ok(None);
    };

    let value = serde_json::to_value(data).map_err(|source| RecordHistoryError::Serialize {
        id: id.to_string(),
        source,
    })?;

    let target = match value.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    Ok(target.filter(|new_id| new_id != id))
}
