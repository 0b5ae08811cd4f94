//! Telemetry initialisation primitives and logging configuration.
//!
//! # Design
//! - Centralises logging setup (pretty, compact or JSON) with a single entry point.
//! - `RUST_LOG` wins over the configured level when present.
//! - Browser builds always write compact, timestamp-free lines to the console.

use anyhow::{Result, anyhow};
use serde_json::Value;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(target_arch = "wasm32")]
use crate::console::MakeConsoleWriter;

/// Default logging target when `RUST_LOG` is not provided.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// Log level or filter directive (e.g., `info`, `qwantum_ui=debug`).
    pub level: &'a str,
    /// Output format selection for the tracing subscriber.
    pub format: LogFormat,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            format: LogFormat::infer(),
        }
    }
}

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Emit logs as structured JSON objects.
    Json,
    /// Emit human-readable, pretty-printed logs.
    Pretty,
    /// Emit one terse line per event.
    Compact,
}

impl LogFormat {
    /// Choose a sensible default for the current build.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Compact
        } else if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Read `logFormat` from a configuration document.
#[must_use]
pub fn log_format_from_config(config: Option<&Value>) -> Option<LogFormat> {
    config
        .and_then(|value| value.get("logFormat"))
        .and_then(Value::as_str)
        .map(|value| match value {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            "compact" => LogFormat::Compact,
            _ => LogFormat::infer(),
        })
}

/// Read `logLevel` from a configuration document.
#[must_use]
pub fn log_level_from_config(config: Option<&Value>) -> Option<&str> {
    config
        .and_then(|value| value.get("logLevel"))
        .and_then(Value::as_str)
        .filter(|level| !level.trim().is_empty())
}

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the tracing subscriber cannot be installed (for example,
/// because another subscriber has already been set globally).
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    install_fmt_subscriber(config)
}

#[cfg(not(target_arch = "wasm32"))]
fn install_fmt_subscriber(config: &LoggingConfig) -> Result<()> {
    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(build_env_filter(config.level))
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .try_init()
            .map_err(|err| anyhow!("failed to install tracing subscriber: {err}")),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(build_env_filter(config.level))
            .with(fmt::layer().pretty().with_target(false).with_thread_ids(false))
            .try_init()
            .map_err(|err| anyhow!("failed to install tracing subscriber: {err}")),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(build_env_filter(config.level))
            .with(fmt::layer().compact().with_target(false).with_thread_ids(false))
            .try_init()
            .map_err(|err| anyhow!("failed to install tracing subscriber: {err}")),
    }
}

#[cfg(target_arch = "wasm32")]
fn install_fmt_subscriber(config: &LoggingConfig) -> Result<()> {
    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(build_env_filter(config.level))
            .with(
                fmt::layer()
                    .json()
                    .without_time()
                    .with_writer(MakeConsoleWriter),
            )
            .try_init()
            .map_err(|err| anyhow!("failed to install tracing subscriber: {err}")),
        LogFormat::Pretty | LogFormat::Compact => tracing_subscriber::registry()
            .with(build_env_filter(config.level))
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_ansi(false)
                    .with_writer(MakeConsoleWriter),
            )
            .try_init()
            .map_err(|err| anyhow!("failed to install tracing subscriber: {err}")),
    }
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn log_format_from_config_parses_variants() {
        let json_config = json!({"logFormat": "json"});
        assert_eq!(
            log_format_from_config(Some(&json_config)),
            Some(LogFormat::Json)
        );
        let compact = json!({"logFormat": "compact"});
        assert_eq!(log_format_from_config(Some(&compact)), Some(LogFormat::Compact));
        assert_eq!(
            log_format_from_config(Some(&json!({"logFormat": "unknown"}))),
            Some(LogFormat::infer())
        );
        assert!(log_format_from_config(None).is_none());
    }

    #[test]
    fn log_level_from_config_ignores_blank_values() {
        let config = json!({"logLevel": "debug"});
        assert_eq!(log_level_from_config(Some(&config)), Some("debug"));
        assert_eq!(log_level_from_config(Some(&json!({"logLevel": " "}))), None);
        assert_eq!(log_level_from_config(Some(&json!({}))), None);
    }

    #[test]
    fn init_logging_installs_subscriber_once() {
        let config = LoggingConfig {
            level: "info",
            format: LogFormat::Pretty,
        };
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
