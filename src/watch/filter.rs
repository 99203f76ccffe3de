// src/watch/filter.rs

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Component, Path};

use crate::config::{WatcherConfig, WATCHED_EXTENSIONS};

/// Decides which discovered files are monitored.
///
/// A file qualifies when all of the following hold:
/// - its extension is on the allow-list (exact match, case-sensitive);
/// - no directory between the root and the file is an ignored name;
/// - no segment of the root-relative path starts with a dot.
///
/// Ignored names are compared against whole path segments, so `mygitrepo`
/// is never excluded because of `.git`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    ignored_dirs: BTreeSet<String>,
    /// Stored without the leading dot, to compare with `Path::extension`.
    extensions: Vec<String>,
}

impl PathFilter {
    /// Filter with the built-in extension allow-list.
    pub fn new(ignored_dirs: BTreeSet<String>) -> Self {
        Self::with_extensions(ignored_dirs, WATCHED_EXTENSIONS)
    }

    pub fn with_extensions(ignored_dirs: BTreeSet<String>, extensions: &[&str]) -> Self {
        let extensions = extensions
            .iter()
            .map(|&e| e.strip_prefix('.').unwrap_or(e).to_string())
            .collect();
        Self {
            ignored_dirs,
            extensions,
        }
    }

    pub fn from_config(cfg: &WatcherConfig) -> Self {
        Self::new(cfg.ignored_dirs.clone())
    }

    pub fn ignored_dirs(&self) -> &BTreeSet<String> {
        &self.ignored_dirs
    }

    /// Whether the walk should enter a directory with this name.
    pub fn should_descend(&self, dir_name: &OsStr) -> bool {
        let name = dir_name.to_string_lossy();
        !is_hidden(&name) && !self.ignored_dirs.contains(&*name)
    }

    pub fn has_watched_extension(&self, file: &Path) -> bool {
        match file.extension().and_then(OsStr::to_str) {
            Some(ext) => self.extensions.iter().any(|allowed| allowed == ext),
            None => false,
        }
    }

    /// Full check for a file path relative to the root it was found under.
    ///
    /// Non-normal components (a leading `/`, `..`) are skipped, so passing an
    /// absolute path checks every segment of it instead.
    pub fn qualifies(&self, rel_path: &Path) -> bool {
        if !self.has_watched_extension(rel_path) {
            return false;
        }

        let segments: Vec<&OsStr> = rel_path
            .components()
            .filter_map(|c| match c {
                Component::Normal(seg) => Some(seg),
                _ => None,
            })
            .collect();

        let Some((file_name, dirs)) = segments.split_last() else {
            return false;
        };

        if is_hidden(&file_name.to_string_lossy()) {
            return false;
        }

        dirs.iter().all(|dir| self.should_descend(dir))
    }
}

fn is_hidden(segment: &str) -> bool {
    segment.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(ignored: &[&str]) -> PathFilter {
        PathFilter::new(ignored.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn allow_listed_extensions_only() {
        let f = filter(&[]);
        assert!(f.qualifies(Path::new("service.py")));
        assert!(f.qualifies(Path::new("conf/settings.json")));
        assert!(f.qualifies(Path::new("templates/index.phtml")));
        assert!(!f.qualifies(Path::new("notes.txt")));
        assert!(!f.qualifies(Path::new("module.pyc")));
        assert!(!f.qualifies(Path::new("Makefile")));
        assert!(!f.qualifies(Path::new("UPPER.PY")));
    }

    #[test]
    fn ignored_directory_anywhere_below_root_excludes() {
        let f = filter(&["build"]);
        assert!(!f.qualifies(Path::new("build/out.py")));
        assert!(!f.qualifies(Path::new("pkg/build/deep/out.py")));
        assert!(!f.qualifies(Path::new("pkg/__pycache__/mod.py")));
        assert!(f.qualifies(Path::new("pkg/builder/out.py")));
    }

    #[test]
    fn ignore_matching_is_by_whole_segment() {
        let f = filter(&["git"]);
        assert!(f.qualifies(Path::new("mygitrepo/app.py")));
        assert!(f.qualifies(Path::new("gitlab/app.py")));
        assert!(!f.qualifies(Path::new("git/app.py")));
    }

    #[test]
    fn file_named_like_ignored_dir_still_qualifies() {
        let f = filter(&["build.py"]);
        assert!(f.qualifies(Path::new("build.py")));
        assert!(!f.qualifies(Path::new("build.py/inner.py")));
    }

    #[test]
    fn hidden_segments_are_excluded() {
        let f = filter(&[]);
        assert!(!f.qualifies(Path::new(".hidden.py")));
        assert!(!f.qualifies(Path::new(".venv/lib/site.py")));
        assert!(!f.qualifies(Path::new("pkg/.cache/x.json")));
        assert!(f.qualifies(Path::new("pkg/not.hidden/x.json")));
    }

    #[test]
    fn custom_allow_list_accepts_dotted_and_bare_entries() {
        let f = PathFilter::with_extensions(BTreeSet::new(), &[".py", "rs"]);
        assert!(f.qualifies(Path::new("a.py")));
        assert!(f.qualifies(Path::new("src/lib.rs")));
        assert!(!f.qualifies(Path::new("a.json")));
    }

    #[test]
    fn descend_check_uses_ignore_set_and_dot_rule() {
        let f = filter(&["node_modules"]);
        assert!(f.should_descend(OsStr::new("src")));
        assert!(!f.should_descend(OsStr::new("node_modules")));
        assert!(!f.should_descend(OsStr::new(".git")));
        assert!(!f.should_descend(OsStr::new(".idea")));
    }
}
