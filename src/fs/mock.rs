// src/fs/mock.rs

use super::FileSystem;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(SystemTime),
    Dir(Vec<String>), // List of child names
}

#[derive(Debug, Default)]
struct MockState {
    entries: HashMap<PathBuf, MockEntry>,
    failures: HashMap<PathBuf, io::ErrorKind>,
    clock: u64,
}

impl MockState {
    /// Advance the logical clock; every write gets a distinct mtime.
    fn tick(&mut self) -> SystemTime {
        self.clock += 1;
        UNIX_EPOCH + Duration::from_millis(1_700_000_000_000 + self.clock * 250)
    }

    fn ensure_dir_entry(&mut self, path: &Path) {
        if self.entries.contains_key(path) {
            return;
        }
        self.entries
            .insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
        if let Some(parent) = path.parent() {
            self.ensure_dir_entry(parent);
            self.link_child(parent, path);
        }
    }

    fn link_child(&mut self, parent: &Path, child: &Path) {
        if let (Some(MockEntry::Dir(children)), Some(name)) = (
            self.entries.get_mut(parent),
            child.file_name().and_then(|n| n.to_str()),
        ) {
            if !children.iter().any(|c| c == name) {
                children.push(name.to_string());
            }
        }
    }

    fn unlink_child(&mut self, parent: &Path, child: &Path) {
        if let (Some(MockEntry::Dir(children)), Some(name)) = (
            self.entries.get_mut(parent),
            child.file_name().and_then(|n| n.to_str()),
        ) {
            children.retain(|c| c != name);
        }
    }
}

/// In-memory filesystem with a logical clock for modification times.
///
/// Paths are expected to be absolute (e.g. `/proj/a.py`); parent
/// directories are created implicitly.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("not found: {:?}", path))
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A poisoned lock only happens after a panicking test thread.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Create (or overwrite) a file with a fresh modification time.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.lock();
        let mtime = state.tick();
        state.entries.insert(path.to_path_buf(), MockEntry::File(mtime));
        if let Some(parent) = path.parent() {
            state.ensure_dir_entry(parent);
            state.link_child(parent, path);
        }
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.lock().ensure_dir_entry(path.as_ref());
    }

    /// Bump the modification time of an existing file.
    pub fn touch(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.lock();
        let mtime = state.tick();
        if let Some(MockEntry::File(modified)) = state.entries.get_mut(path) {
            *modified = mtime;
        }
    }

    pub fn set_modified(&self, path: impl AsRef<Path>, mtime: SystemTime) {
        if let Some(MockEntry::File(modified)) = self.lock().entries.get_mut(path.as_ref()) {
            *modified = mtime;
        }
    }

    /// Remove a file or a whole directory subtree.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.lock();
        state.entries.retain(|p, _| !p.starts_with(path));
        if let Some(parent) = path.parent() {
            state.unlink_child(parent, path);
        }
    }

    /// List a file in its parent directory without giving it any metadata,
    /// as if it vanished between the listing and the stat call.
    pub fn add_vanishing_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            state.ensure_dir_entry(parent);
            state.link_child(parent, path);
        }
    }

    /// Make `read_dir` on this directory fail with `PermissionDenied`.
    pub fn deny(&self, path: impl AsRef<Path>) {
        self.fail_with(path, io::ErrorKind::PermissionDenied);
    }

    /// Make `read_dir` on this directory fail with an error of `kind`.
    pub fn fail_with(&self, path: impl AsRef<Path>, kind: io::ErrorKind) {
        self.lock().failures.insert(path.as_ref().to_path_buf(), kind);
    }
}

impl FileSystem for MockFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let state = self.lock();
        if let Some(kind) = state.failures.get(path) {
            return Err(io::Error::new(
                *kind,
                format!("cannot read directory: {:?}", path),
            ));
        }
        match state.entries.get(path) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            Some(MockEntry::File(_)) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("not a directory: {:?}", path),
            )),
            None => Err(not_found(path)),
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.lock().entries.get(path), Some(MockEntry::Dir(_)))
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        match self.lock().entries.get(path) {
            Some(MockEntry::File(mtime)) => Ok(*mtime),
            Some(MockEntry::Dir(_)) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {:?}", path),
            )),
            None => Err(not_found(path)),
        }
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        // Paths in the mock are already absolute; only existence is checked.
        if self.lock().entries.contains_key(path) {
            Ok(path.to_path_buf())
        } else {
            Err(not_found(path))
        }
    }
}
