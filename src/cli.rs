// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `treewatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "treewatch",
    version,
    about = "Poll a source tree and run a reload command when monitored files change.",
    long_about = None
)]
pub struct CliArgs {
    /// Optional TOML config file with an `[options.watcher]` table.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory to scan recursively. May be given more than once.
    ///
    /// Replaces any roots from the config file. The first root is the one
    /// changed paths are displayed relative to.
    #[arg(long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    /// Extra directory name to skip during traversal. May be repeated.
    #[arg(long = "ignore", value_name = "NAME")]
    pub ignored_dirs: Vec<String>,

    /// Shell command to run whenever a change is detected.
    #[arg(long, value_name = "CMD")]
    pub exec: Option<String>,

    /// Print every monitored file and exit.
    #[arg(long)]
    pub list: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TREEWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
