// src/logging.rs

//! Logging setup for `treewatch` using `tracing` + `tracing-subscriber`.
//!
//! Filter selection, first match wins:
//! 1. `--log-level` CLI flag, applied to every target
//! 2. `TREEWATCH_LOG`, either a bare level ("debug") or full `EnvFilter`
//!    directives ("treewatch::files=warn,treewatch=debug")
//! 3. `info`
//!
//! Output goes to stderr so `--list` stays pipeable.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "TREEWATCH_LOG";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(lvl) => EnvFilter::new(level_from_log_level(lvl).as_str().to_ascii_lowercase()),
        None => filter_from_env(std::env::var(LOG_ENV_VAR).ok().as_deref()),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

fn filter_from_env(value: Option<&str>) -> EnvFilter {
    match value.map(str::trim) {
        None | Some("") => EnvFilter::new("info"),
        Some(raw) => match parse_level_str(raw) {
            Some(level) => EnvFilter::new(level.as_str().to_ascii_lowercase()),
            None => EnvFilter::try_new(raw).unwrap_or_else(|_| EnvFilter::new("info")),
        },
    }
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
