// src/exec/mod.rs

//! Reload command execution.
//!
//! The watcher itself only calls a [`ReloadCallback`](crate::watch::ReloadCallback).
//! This module provides the one the `treewatch` binary uses: a shell command
//! run through `tokio::process::Command` each time changes are detected.

pub mod command;

pub use command::ShellCommand;
