use crate::{RecordHistoryError, RecordHistoryResult};

/// Checks that `id` names a plain file directly inside the repository root.
///
/// Leading dots would reach into backend metadata and leading dashes would
/// be read as options by the backend tools.
pub fn validate_record_id(id: &str) -> RecordHistoryResult<()> {
    let reason = if id.is_empty() {
        Some("must not be empty")
    } else if id.contains('/') || id.contains('\\') {
        Some("must not contain path separators")
    } else if id.starts_with('.') {
        Some("must not start with '.'")
    } else if id.starts_with('-') {
        Some("must not start with '-'")
    } else if id.chars().any(char::is_control) {
        Some("must not contain control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(RecordHistoryError::InvalidRecordId {
            id: id.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
