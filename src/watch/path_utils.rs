// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::Path;

/// Path shown for a changed file: relative to `root` with forward slashes
/// when `root` is a prefix of `path`, otherwise the absolute path unchanged.
///
/// The prefix test is per component, so `/proj` is not a prefix of
/// `/project/a.py`.
pub fn display_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().replace('\\', "/"),
        _ => path.to_string_lossy().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_root_prefix() {
        assert_eq!(
            display_path(Path::new("/proj"), Path::new("/proj/pkg/a.py")),
            "pkg/a.py"
        );
    }

    #[test]
    fn falls_back_to_absolute_path_outside_root() {
        assert_eq!(
            display_path(Path::new("/proj"), Path::new("/other/b.py")),
            "/other/b.py"
        );
    }

    #[test]
    fn sibling_with_shared_string_prefix_is_not_relativized() {
        assert_eq!(
            display_path(Path::new("/proj"), Path::new("/project/c.py")),
            "/project/c.py"
        );
    }
}
