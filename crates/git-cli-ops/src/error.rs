use thiserror::Error;

/// Error taxonomy for git and patch CLI orchestration.
#[derive(Debug, Error)]
pub enum GitCliOpsError {
    #[error("git is not installed")]
    GitNotInstalled,

    #[error("patch is not installed")]
    PatchToolNotInstalled,

    #[error("Not a git repository: {message}")]
    NotARepository { message: String },

    #[error("Revision not found: {message}")]
    RevisionNotFound { message: String },

    #[error("Path not found: {message}")]
    PathNotFound { message: String },

    #[error("Nothing to commit: {message}")]
    NothingToCommit { message: String },

    #[error("{tool} command failed: {message}")]
    CommandFailed {
        tool: &'static str,
        message: String,
        exit_code: Option<i32>,
        stderr: String,
        stdout: String,
    },

    #[error("{tool} command timed out after {timeout_secs}s: {command}")]
    Timeout {
        tool: &'static str,
        command: String,
        timeout_secs: u64,
    },

    #[error("Unreadable command output: {message}")]
    InvalidOutput { message: String },

    #[error("Scratch artifact error: {0}")]
    Io(#[from] std::io::Error),
}

impl GitCliOpsError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::GitNotInstalled => "git_not_installed",
            Self::PatchToolNotInstalled => "patch_not_installed",
            Self::NotARepository { .. } => "not_a_repository",
            Self::RevisionNotFound { .. } => "revision_not_found",
            Self::PathNotFound { .. } => "path_not_found",
            Self::NothingToCommit { .. } => "nothing_to_commit",
            Self::CommandFailed { .. } => "command_failed",
            Self::Timeout { .. } => "timeout",
            Self::InvalidOutput { .. } => "invalid_output",
            Self::Io(_) => "io",
        }
    }

    /// Whether the failure means the referenced revision does not exist.
    pub fn is_revision_not_found(&self) -> bool {
        matches!(self, Self::RevisionNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let cases: Vec<(GitCliOpsError, &str)> = vec![
            (GitCliOpsError::GitNotInstalled, "git_not_installed"),
            (GitCliOpsError::PatchToolNotInstalled, "patch_not_installed"),
            (
                GitCliOpsError::RevisionNotFound {
                    message: "bad revision".into(),
                },
                "revision_not_found",
            ),
            (
                GitCliOpsError::Timeout {
                    tool: "git",
                    command: "git commit".into(),
                    timeout_secs: 30,
                },
                "timeout",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.code(), expected, "code for {:?}", error);
        }
    }

    #[test]
    fn command_failed_display_names_the_tool() {
        let err = GitCliOpsError::CommandFailed {
            tool: "patch",
            message: "hunk FAILED".into(),
            exit_code: Some(1),
            stderr: "hunk FAILED".into(),
            stdout: String::new(),
        };
        assert_eq!(err.to_string(), "patch command failed: hunk FAILED");
    }

    #[test]
    fn only_revision_not_found_reports_missing_revision() {
        assert!(GitCliOpsError::RevisionNotFound {
            message: String::new()
        }
        .is_revision_not_found());
        assert!(!GitCliOpsError::PathNotFound {
            message: String::new()
        }
        .is_revision_not_found());
    }
}
