// src/errors.rs

//! Crate-wide error type.
//!
//! Per-file races during a scan never show up here; they are handled inside
//! the snapshot builder. Everything else is surfaced to the owner of the
//! watcher.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    /// A configured root could not be resolved or read at construction.
    #[error("watch root {path:?} is not accessible: {source}")]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O failure during a tree walk that is not a per-file race.
    #[error("scanning {path:?} failed: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reload callback failed: {0}")]
    Callback(#[source] anyhow::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The blocking scan task panicked or was aborted.
    #[error("scan task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, WatchError>;
