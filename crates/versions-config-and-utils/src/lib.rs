//! Configuration, paths and logging bootstrap for the versions record store.

mod bootstrap;
mod config;
mod error;
mod logging;
mod paths;

pub use bootstrap::open_repository;
pub use config::{Config, DEFAULT_LOG_LEVEL};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, init_logging_for_service, parse_level};
pub use paths::Paths;

// Re-export the option types the config produces
pub use git_cli_ops::GitInvocationOptions;
pub use record_history::RepositoryOptions;
