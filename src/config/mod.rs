// src/config/mod.rs

//! Configuration loading and validation for treewatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and the resolved `WatcherConfig` (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate ignored directory names (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{config_dir, load_and_validate, load_from_path};
pub use model::{
    default_root, OptionsSection, RawConfigFile, WatcherConfig, WatcherSection,
    DEFAULT_IGNORED_DIRS, WATCHED_EXTENSIONS,
};
