//! # Git CLI Ops
//!
//! Backend process gateway for the versions record store.
//!
//! Git CLI Ops owns process execution, timeout control, output parsing and
//! error normalization for the `git` and `patch` invocations that persist
//! and reconstruct record history. The record store talks to it only
//! through the [`VersionControlBackend`] trait.

mod backend;
mod command_runner;
mod error;
mod git_cli;
mod scratch;
mod types;

pub use backend::VersionControlBackend;
pub use command_runner::{CommandRunOutput, CommandRunner, Tool};
pub use error::GitCliOpsError;
pub use git_cli::GitCliBackend;
pub use scratch::ScratchArtifacts;
pub use types::{
    GitInvocationOptions, Revision, DEFAULT_AUTHOR_EMAIL, DEFAULT_AUTHOR_NAME,
    DEFAULT_TIMEOUT_SECS,
};
