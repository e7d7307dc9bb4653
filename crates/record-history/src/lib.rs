//! # Record History
//!
//! Per-record version history for JSON documents, with a git working tree as
//! the durable, content-addressed log.
//!
//! ## Overview
//!
//! Each record is one file, `<root>/<id>`, holding the record's JSON with no
//! envelope. Every write is committed, so the backend log is an append-only
//! history of snapshots that can be listed, reconstructed and diffed.
//!
//! ## Key Operations
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`Repository::open`] | Probe the root, initialize it when allowed |
//! | [`Repository::store`] | Write and commit a record, or rename it via an id field |
//! | [`Repository::list_revs`] | Revisions touching a record, newest first |
//! | [`Repository::get_rev`] | Record content as of a revision |
//! | [`Repository::diff`] | Structural diff of a record between two revisions |
//! | [`deep_diff`] | Pure structural diff of two JSON values |
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Repository                            │
//! │                                                              │
//! │  store ─────► write file ─► stage ─► commit ──► Revision     │
//! │  list_revs ─► revisions_for_id ──────────────► Vec<Revision> │
//! │  get_rev ───► diff_to_working_copy ─► reverse patch ─► text  │
//! │  diff ──────► get_rev × 2 ─► deep_diff ──────► DiffResult    │
//! │                                                              │
//! │  every operation holds the per-root lock                     │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │          git_cli_ops::VersionControlBackend                  │
//! │          (GitCliBackend: `git` + `patch` processes)          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```ignore
//! use git_cli_ops::GitCliBackend;
//! use record_history::{Repository, RepositoryOptions};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let options = RepositoryOptions::new("/var/lib/versions/records", "/var/lib/versions/patches");
//! let repo = Repository::open(options, Arc::new(GitCliBackend::default())).await?;
//!
//! repo.store("12345", &json!({ "foo": "bar" }), None).await?;
//! repo.store("12345", &json!({ "foo": "baz" }), None).await?;
//!
//! let revs = repo.list_revs("12345").await?.unwrap_or_default();
//! let first = repo.get_rev("12345", &revs[1]).await?;
//! let changes = repo.diff("12345", &revs[1], &revs[0]).await?;
//! ```
//!
//! ## Error Handling
//!
//! Unknown ids, unknown or malformed revisions, and records absent at the
//! requested revision are `Ok(None)`. Everything else is a
//! [`RecordHistoryError`]: backend command failures, commit failures after a
//! successful stage or rename, reconstruction failures, and stored content
//! that is not valid JSON.
//!
//! ## Concurrency
//!
//! Operations on one root are serialized by an async mutex from
//! [`RootLocks`]. Concurrent callers on the same root queue up; different
//! roots proceed independently.

mod deep_diff;
mod error;
mod history;
mod lock;
mod options;
mod pipeline;
mod record_id;
mod repository;
mod snapshot;
mod store;

#[cfg(test)]
mod tests;

pub use deep_diff::{deep_diff, AddedEntry, ChangedEntry, DiffResult, RemovedEntry};
pub use error::{RecordHistoryError, RecordHistoryResult};
pub use git_cli_ops::Revision;
pub use lock::{RootLock, RootLocks};
pub use options::RepositoryOptions;
pub use record_id::validate_record_id;
pub use repository::{Repository, RepositoryStatus};
