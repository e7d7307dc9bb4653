//! Logging initialization.
//!
//! Every component logs through the observability crate, which writes
//! structured JSONL to `~/.versions/logs/dev.jsonl` and mirrors events to
//! stderr.

use crate::CoreResult;

#[allow(unused_imports)]
pub use observability::{init, init_with_config, LogConfig};

/// Initialize the logging system under the default `versions` service name.
///
/// # Example
///
/// ```ignore
/// init_logging("info")?;
/// tracing::info!("record store ready");
/// ```
pub fn init_logging(level: &str) -> CoreResult<()> {
    init_logging_for_service("versions", level)
}

/// Initialize logging with a custom service name.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logging_for_service(service_name: &str, level: &str) -> CoreResult<()> {
    observability::init_with_config(LogConfig {
        service_name: service_name.into(),
        default_level: parse_level(level).as_str().to_ascii_lowercase(),
        also_stderr: true,
        ..Default::default()
    })?;
    Ok(())
}

/// Parse a log level string into a tracing Level.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
