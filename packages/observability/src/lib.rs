//! # Observability
//!
//! Centralized logging for the versions workspace.
//!
//! ## Design
//!
//! Crates are **log producers** only. They emit events with the standard
//! `tracing` macros and know nothing about where those events end up. The
//! embedding process calls [`init_with_config`] once at startup.
//!
//! Events are written as structured JSONL to a single append-only file,
//! `~/.versions/logs/dev.jsonl` by default, which makes
//! `tail -f ~/.versions/logs/dev.jsonl | jq` a usable live view.
//! An optional compact stderr layer mirrors events for foreground runs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! fn main() -> std::io::Result<()> {
//!     observability::init_with_config(observability::LogConfig {
//!         service_name: "versions".into(),
//!         default_level: "debug".into(),
//!         also_stderr: true,
//!         ..Default::default()
//!     })?;
//!
//!     tracing::info!("service started");
//!     Ok(())
//! }
//! ```

mod json_layer;
mod writer;

use std::io;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use json_layer::{JsonLayer, LogEntry};
pub use writer::{CentralLogWriter, WriterFactory};

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service (e.g., "versions", "record-history-tests").
    /// Included in every log line for filtering.
    pub service_name: String,

    /// Default log level filter (e.g., "debug", "info", "warn").
    /// Can be overridden by `RUST_LOG` environment variable.
    pub default_level: String,

    /// Optional custom log file path.
    /// Defaults to `~/.versions/logs/dev.jsonl`.
    pub log_path: Option<PathBuf>,

    /// Also emit logs to stderr for immediate feedback.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            log_path: None,
            also_stderr: false,
        }
    }
}

/// Central log file location shared by all services.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".versions").join("logs").join("dev.jsonl"))
}

/// Initialize logging with default settings for the given service.
pub fn init(service_name: &str) -> io::Result<()> {
    init_with_config(LogConfig {
        service_name: service_name.into(),
        ..Default::default()
    })
}

/// Initialize logging with custom configuration.
///
/// When no log path is configured and no home directory can be resolved,
/// only the stderr layer is installed (and it is forced on).
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or if a global
/// subscriber has already been installed.
pub fn init_with_config(config: LogConfig) -> io::Result<()> {
    let log_path = config.log_path.clone().or_else(default_log_path);

    let json_layer = match &log_path {
        Some(path) => {
            let writer = CentralLogWriter::new(path)?;
            Some(JsonLayer::new(
                config.service_name.clone(),
                WriterFactory::new(writer),
            ))
        }
        None => None,
    };

    let stderr_layer = if config.also_stderr || json_layer.is_none() {
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .compact()
                .with_writer(io::stderr)
                .with_ansi(true),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(json_layer.map(|l| l.with_filter(env_filter(&config.default_level))))
        .with(stderr_layer.map(|l| l.with_filter(env_filter(&config.default_level))))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e.to_string()))?;

    match log_path {
        Some(path) => tracing::info!(
            service = %config.service_name,
            log_path = %path.display(),
            "observability initialized"
        ),
        None => tracing::info!(
            service = %config.service_name,
            "observability initialized without a log file"
        ),
    }

    Ok(())
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Re-export tracing macros for convenience.
pub use tracing::{debug, error, info, instrument, trace, warn};

/// Re-export Level for advanced filtering.
pub use tracing::Level;
