// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{RawConfigFile, WatcherConfig};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; relative roots are left as
/// written. Use [`load_and_validate`] for a ready-to-use config.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file, resolve relative roots against the file's
/// directory and validate the result.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<WatcherConfig> {
    let path = path.as_ref();
    let raw = load_from_path(path)?;
    let section = raw.options.watcher.resolve_roots(config_dir(path));
    WatcherConfig::try_from(section)
}

/// Directory a config file lives in; a bare filename means the working dir.
pub fn config_dir(config_path: &Path) -> &Path {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
