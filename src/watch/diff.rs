// src/watch/diff.rs

//! Snapshot comparison.
//!
//! [`compare`] is pure: it never touches the filesystem and never stores
//! anything. The caller decides when the returned snapshot becomes the new
//! baseline.

use std::fmt;
use std::path::Path;

use crate::watch::path_utils::display_path;
use crate::watch::snapshot::Snapshot;

/// One of the three change categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Removed,
    Updated,
}

impl ChangeKind {
    /// Prefix used in the reporter's log lines.
    pub fn label(self) -> &'static str {
        match self {
            ChangeKind::Added => "New files",
            ChangeKind::Removed => "Removed files",
            ChangeKind::Updated => "Updated files",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Updated => "updated",
        };
        f.write_str(s)
    }
}

/// Changed files between two snapshots, in display form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub updated: Vec<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }

    /// Total number of changed paths across all categories.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.updated.len()
    }

    pub fn category(&self, kind: ChangeKind) -> &[String] {
        match kind {
            ChangeKind::Added => &self.added,
            ChangeKind::Removed => &self.removed,
            ChangeKind::Updated => &self.updated,
        }
    }
}

/// Compare `previous` with `current` and hand `current` back as the next
/// baseline.
///
/// An empty `previous` means no baseline was ever recorded: the result is
/// an empty change set no matter what `current` holds. Use
/// [`compare_recorded`] when an empty `previous` is a real, recorded state.
pub fn compare(
    previous: &Snapshot,
    current: Snapshot,
    display_root: &Path,
) -> (ChangeSet, Snapshot) {
    if previous.is_empty() {
        return (ChangeSet::default(), current);
    }
    compare_recorded(previous, current, display_root)
}

/// Full comparison against a baseline that was actually recorded, even if
/// it holds no files. Everything in `current` that `previous` lacks is added.
pub fn compare_recorded(
    previous: &Snapshot,
    current: Snapshot,
    display_root: &Path,
) -> (ChangeSet, Snapshot) {
    let mut changes = ChangeSet::default();

    for (path, mtime) in &current {
        match previous.get(path) {
            None => changes.added.push(display_path(display_root, path)),
            Some(before) if before != *mtime => {
                changes.updated.push(display_path(display_root, path))
            }
            Some(_) => {}
        }
    }

    changes.removed = previous
        .paths()
        .filter(|path| !current.contains(path))
        .map(|path| display_path(display_root, path))
        .collect();

    (changes, current)
}
