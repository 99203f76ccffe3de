// src/config/model.rs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Directory names that are never descended into.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "__pycache__",
    ".git",
    ".svn",
    "__ignored__",
    "__temporary__",
    "__tmp__",
];

/// File suffixes eligible for monitoring. Fixed; not configurable.
pub const WATCHED_EXTENSIONS: &[&str] = &[".py", ".json", ".yml", ".html", ".phtml"];

/// Top-level configuration as read from a TOML file.
///
/// Only the watcher table of the host's `[options]` section is read:
///
/// ```toml
/// [options.watcher]
/// roots = ["src"]
/// ignored_dirs = ["build", "node_modules"]
/// ```
///
/// Any other table or key in the file is ignored.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub options: OptionsSection,
}

/// `[options]` section. Only `watcher` is recognized.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OptionsSection {
    #[serde(default)]
    pub watcher: WatcherSection,
}

/// `[options.watcher]` section, before validation.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WatcherSection {
    /// Directories to scan. Empty means "directory of the entry point".
    #[serde(default)]
    pub roots: Vec<PathBuf>,

    /// Names added to [`DEFAULT_IGNORED_DIRS`].
    #[serde(default)]
    pub ignored_dirs: Vec<String>,
}

impl WatcherSection {
    /// Make relative roots relative to `base` (usually the config file's
    /// directory) instead of the process working directory.
    pub fn resolve_roots(mut self, base: &Path) -> Self {
        self.roots = self
            .roots
            .into_iter()
            .map(|r| if r.is_relative() { base.join(r) } else { r })
            .collect();
        self
    }
}

/// Validated watcher configuration, resolved once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherConfig {
    /// Ordered roots. The first one is used to display changed paths.
    pub roots: Vec<PathBuf>,
    /// Built-in defaults plus caller additions.
    pub ignored_dirs: BTreeSet<String>,
}

impl WatcherConfig {
    /// Build a config without going through TOML.
    ///
    /// An empty `roots` falls back to [`default_root`]. Names are not
    /// validated here; use `WatcherConfig::try_from(WatcherSection)` for
    /// untrusted input.
    pub fn new<I, S>(roots: Vec<PathBuf>, extra_ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roots = if roots.is_empty() {
            vec![default_root()]
        } else {
            roots
        };

        let mut ignored_dirs: BTreeSet<String> =
            DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect();
        ignored_dirs.extend(extra_ignored.into_iter().map(Into::into));

        Self {
            roots,
            ignored_dirs,
        }
    }

    /// Convenience for a single root and no extra ignores.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self::new(vec![root.into()], std::iter::empty::<String>())
    }

    /// Add one more ignored directory name.
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignored_dirs.insert(name.into());
        self
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self::new(Vec::new(), std::iter::empty::<String>())
    }
}

/// Directory containing the running entry point (the current executable),
/// or `.` if that cannot be determined.
pub fn default_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
