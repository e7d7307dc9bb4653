use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_AUTHOR_NAME: &str = "versions";
pub const DEFAULT_AUTHOR_EMAIL: &str = "versions@localhost";

/// Opaque backend commit identifier, kept exactly as the backend printed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier can be handed to a backend as a revision
    /// argument. Empty strings, anything that would parse as a command-line
    /// option, and identifiers with whitespace or control characters are
    /// rejected.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && !self.0.starts_with('-')
            && !self.0.chars().any(|c| c.is_whitespace() || c.is_control())
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Revision {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Revision {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// How backend processes are located and invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitInvocationOptions {
    /// Explicit git executable; resolved from the environment when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    /// Explicit patch executable; resolved from the environment when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch_executable: Option<String>,
    /// Per-invocation timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Author and committer name recorded on every commit.
    #[serde(default = "default_author_name")]
    pub author_name: String,
    /// Author and committer email recorded on every commit.
    #[serde(default = "default_author_email")]
    pub author_email: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_author_name() -> String {
    DEFAULT_AUTHOR_NAME.to_string()
}

fn default_author_email() -> String {
    DEFAULT_AUTHOR_EMAIL.to_string()
}

impl Default for GitInvocationOptions {
    fn default() -> Self {
        Self {
            executable: None,
            patch_executable: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            author_name: default_author_name(),
            author_email: default_author_email(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_serializes_as_plain_string() {
        let rev = Revision::new("4b825dc642cb6eb9a060e54bf8d69288fbee4904");
        let json = serde_json::to_string(&rev).unwrap();
        assert_eq!(json, "\"4b825dc642cb6eb9a060e54bf8d69288fbee4904\"");
        assert_eq!(rev.to_string(), rev.as_str());
    }

    #[test]
    fn option_like_revisions_are_not_well_formed() {
        for raw in ["", "--cached", "--output=/tmp/x", "-R", "HEAD --stat", "a\nb"] {
            assert!(!Revision::new(raw).is_well_formed(), "{raw:?}");
        }
        for raw in ["HEAD", "HEAD~1", "4b825dc642cb6eb9a060e54bf8d69288fbee4904", "main^{commit}"] {
            assert!(Revision::new(raw).is_well_formed(), "{raw:?}");
        }
    }

    #[test]
    fn options_fill_defaults_from_partial_json() {
        let options: GitInvocationOptions =
            serde_json::from_str(r#"{ "timeout_secs": 5 }"#).unwrap();
        assert_eq!(options.timeout_secs, 5);
        assert_eq!(options.author_name, DEFAULT_AUTHOR_NAME);
        assert_eq!(options.author_email, DEFAULT_AUTHOR_EMAIL);
        assert!(options.executable.is_none());
    }
}
