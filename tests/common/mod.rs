#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use treewatch::config::WatcherConfig;
use treewatch::fs::mock::MockFileSystem;
use treewatch::watch::Watcher;

pub use treewatch_test_utils::{init_tracing, with_timeout};

/// Root used by every mock-filesystem test.
pub const MOCK_ROOT: &str = "/proj";

/// Watcher over the mock filesystem rooted at [`MOCK_ROOT`].
pub fn mock_watcher(fs: &MockFileSystem, ignored: &[&str]) -> Watcher {
    let config = WatcherConfig::new(
        vec![PathBuf::from(MOCK_ROOT)],
        ignored.iter().map(|s| s.to_string()),
    );
    Watcher::with_fs(config, Arc::new(fs.clone())).expect("mock root should be accessible")
}

/// Create a file (and its parent directories) under `root`.
pub fn write_file(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"# content\n").unwrap();
    path
}

/// Set a file's modification time to a fixed number of seconds after the
/// epoch, independent of the filesystem's timestamp granularity.
pub fn set_mtime(path: &Path, secs: u64) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(UNIX_EPOCH + Duration::from_secs(secs)).unwrap();
}
