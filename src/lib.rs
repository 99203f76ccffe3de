// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod watch;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{config_dir, load_from_path, WatcherConfig, WatcherSection};
use crate::exec::ShellCommand;
use crate::watch::{ReloadCallback, Watcher};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides)
/// - the watcher and its optional reload command
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let watcher = Watcher::new(config)?;

    if args.list {
        print_monitored(&watcher);
        return Ok(());
    }

    let callback = args
        .exec
        .as_deref()
        .map(|cmd| Arc::new(ShellCommand::new(cmd)) as Arc<dyn ReloadCallback>);

    let mut handle = watcher.spawn(callback);

    let interrupted = tokio::select! {
        res = handle.wait() => {
            res?;
            false
        }
        res = tokio::signal::ctrl_c() => {
            res.context("failed to listen for Ctrl+C")?;
            true
        }
    };

    if interrupted {
        info!("Ctrl-C received; stopping watcher");
        handle.shutdown().await?;
    }

    Ok(())
}

/// Merge the optional config file with CLI flags.
///
/// `--root` replaces the file's roots; `--ignore` adds to its ignored names.
fn resolve_config(args: &CliArgs) -> Result<WatcherConfig> {
    let mut section = match &args.config {
        Some(path) => load_from_path(path)
            .with_context(|| format!("loading config file {:?}", path))?
            .options
            .watcher
            .resolve_roots(config_dir(path)),
        None => WatcherSection::default(),
    };

    if !args.roots.is_empty() {
        section.roots = args.roots.clone();
    }
    section.ignored_dirs.extend(args.ignored_dirs.iter().cloned());

    let config = WatcherConfig::try_from(section)?;
    debug!(?config, "resolved watcher config");
    Ok(config)
}

/// `--list` output: one display path per line.
fn print_monitored(watcher: &Watcher) {
    for path in watcher.baseline().display_paths(watcher.display_root()) {
        println!("{path}");
    }
}
