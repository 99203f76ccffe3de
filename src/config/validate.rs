// src/config/validate.rs

use crate::config::model::{WatcherConfig, WatcherSection};
use crate::errors::{Result, WatchError};

impl TryFrom<WatcherSection> for WatcherConfig {
    type Error = WatchError;

    fn try_from(raw: WatcherSection) -> std::result::Result<Self, Self::Error> {
        for name in raw.ignored_dirs.iter() {
            validate_ignored_dir(name)?;
        }
        Ok(WatcherConfig::new(raw.roots, raw.ignored_dirs))
    }
}

/// Ignored names are matched against whole path segments, so they must be
/// exactly one segment.
fn validate_ignored_dir(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(WatchError::Config(
            "[options.watcher].ignored_dirs must not contain empty names".to_string(),
        ));
    }
    if trimmed != name {
        return Err(WatchError::Config(format!(
            "ignored directory name '{name}' has leading or trailing whitespace"
        )));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(WatchError::Config(format!(
            "ignored directory name '{name}' must be a single directory name, not a path"
        )));
    }
    if name == "." || name == ".." {
        return Err(WatchError::Config(format!(
            "ignored directory name '{name}' is not a valid directory name"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn section(ignored: &[&str]) -> WatcherSection {
        WatcherSection {
            roots: vec![PathBuf::from("/proj")],
            ignored_dirs: ignored.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn extra_names_are_merged_with_defaults() {
        let cfg = WatcherConfig::try_from(section(&["build", "node_modules"])).unwrap();
        assert!(cfg.ignored_dirs.contains("build"));
        assert!(cfg.ignored_dirs.contains("node_modules"));
        assert!(cfg.ignored_dirs.contains("__pycache__"));
        assert!(cfg.ignored_dirs.contains(".git"));
        assert_eq!(cfg.roots, vec![PathBuf::from("/proj")]);
    }

    #[test]
    fn path_like_names_are_rejected() {
        let err = WatcherConfig::try_from(section(&["build/out"])).unwrap_err();
        match err {
            WatchError::Config(msg) => assert!(msg.contains("build/out")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn empty_and_dot_names_are_rejected() {
        assert!(WatcherConfig::try_from(section(&[""])).is_err());
        assert!(WatcherConfig::try_from(section(&[".."])).is_err());
        assert!(WatcherConfig::try_from(section(&[" tmp"])).is_err());
    }

    #[test]
    fn empty_roots_fall_back_to_entry_point_dir() {
        let cfg = WatcherConfig::try_from(WatcherSection::default()).unwrap();
        assert_eq!(cfg.roots.len(), 1);
    }
}
