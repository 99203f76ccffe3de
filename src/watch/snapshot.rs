// src/watch/snapshot.rs

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, trace};

use crate::errors::{Result, WatchError};
use crate::fs::FileSystem;
use crate::watch::filter::PathFilter;
use crate::watch::path_utils::display_path;

/// Monitored files and their modification times at one point in time.
///
/// Built from scratch on every scan and never mutated afterwards. Iteration
/// order is lexicographic by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    files: BTreeMap<PathBuf, SystemTime>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<SystemTime> {
        self.files.get(path).copied()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, PathBuf, SystemTime> {
        self.files.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    /// All paths in display form relative to `root`.
    pub fn display_paths(&self, root: &Path) -> Vec<String> {
        self.paths().map(|p| display_path(root, p)).collect()
    }
}

impl FromIterator<(PathBuf, SystemTime)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (PathBuf, SystemTime)>>(iter: T) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (&'a PathBuf, &'a SystemTime);
    type IntoIter = btree_map::Iter<'a, PathBuf, SystemTime>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Walks the configured roots and produces a [`Snapshot`].
///
/// Cheap to share: the watcher hands an `Arc` of this to the blocking pool
/// on every tick.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    fs: Arc<dyn FileSystem>,
    roots: Vec<PathBuf>,
    filter: PathFilter,
}

impl SnapshotBuilder {
    /// `roots` are expected to be canonical already.
    pub fn new(fs: Arc<dyn FileSystem>, roots: Vec<PathBuf>, filter: PathFilter) -> Self {
        Self { fs, roots, filter }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn filter(&self) -> &PathFilter {
        &self.filter
    }

    /// Walk every root and collect qualifying files.
    ///
    /// Files and sub-directories that vanish or are unreadable are skipped.
    /// Any other I/O failure, or an unreadable root, aborts the build with
    /// [`WatchError::Scan`].
    pub fn build(&self) -> Result<Snapshot> {
        let mut files = BTreeMap::new();
        for root in &self.roots {
            self.walk_root(root, &mut files)?;
        }
        debug!(files = files.len(), "snapshot built");
        Ok(Snapshot { files })
    }

    fn walk_root(&self, root: &Path, files: &mut BTreeMap<PathBuf, SystemTime>) -> Result<()> {
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let entries = match self.fs.read_dir(&dir) {
                Ok(entries) => entries,
                Err(err) if dir != root && is_race(&err) => {
                    debug!(?dir, error = %err, "skipping directory that is gone or unreadable");
                    continue;
                }
                Err(source) => return Err(WatchError::Scan { path: dir, source }),
            };

            for entry in entries {
                if self.fs.is_dir(&entry) {
                    let descend = entry
                        .file_name()
                        .is_some_and(|name| self.filter.should_descend(name));
                    if descend {
                        pending.push(entry);
                    }
                    continue;
                }

                let rel = entry.strip_prefix(root).unwrap_or(entry.as_path());
                if !self.filter.qualifies(rel) {
                    continue;
                }

                match self.fs.modified(&entry) {
                    Ok(mtime) => {
                        files.insert(entry, mtime);
                    }
                    Err(err) if is_race(&err) => {
                        trace!(path = ?entry, error = %err, "skipping file that vanished during scan");
                    }
                    Err(source) => return Err(WatchError::Scan { path: entry, source }),
                }
            }
        }

        Ok(())
    }
}

/// Errors that mean "the entry is gone or unreadable right now".
fn is_race(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    )
}
