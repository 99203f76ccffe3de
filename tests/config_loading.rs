// tests/config_loading.rs

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use tempfile::{tempdir, NamedTempFile};
use treewatch::config::{load_and_validate, load_from_path, DEFAULT_IGNORED_DIRS};
use treewatch::errors::WatchError;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn watcher_table_is_read_and_unknown_keys_ignored() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("service.toml");
    std::fs::write(
        &path,
        r#"
[options.http]
port = 8080

[options.watcher]
roots = ["src", "/abs/lib"]
ignored_dirs = ["build", "node_modules"]
poll_interval = 3

[other]
anything = true
"#,
    )?;

    let cfg = load_and_validate(&path)?;
    assert_eq!(
        cfg.roots,
        vec![dir.path().join("src"), PathBuf::from("/abs/lib")]
    );
    assert!(cfg.ignored_dirs.contains("build"));
    assert!(cfg.ignored_dirs.contains("node_modules"));
    for name in DEFAULT_IGNORED_DIRS {
        assert!(cfg.ignored_dirs.contains(*name));
    }
    Ok(())
}

#[test]
fn missing_watcher_table_uses_defaults() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(file, "[options]\nname = \"svc\"\n")?;

    let cfg = load_and_validate(file.path())?;
    assert_eq!(cfg.roots.len(), 1);
    assert_eq!(cfg.ignored_dirs.len(), DEFAULT_IGNORED_DIRS.len());
    Ok(())
}

#[test]
fn raw_load_keeps_relative_roots_as_written() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(file, "[options.watcher]\nroots = [\"app\"]\n")?;

    let raw = load_from_path(file.path())?;
    assert_eq!(raw.options.watcher.roots, vec![PathBuf::from("app")]);
    Ok(())
}

#[test]
fn path_like_ignored_name_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[options.watcher]\nignored_dirs = [\"out/tmp\"]\n").unwrap();

    match load_and_validate(file.path()) {
        Err(WatchError::Config(msg)) => assert!(msg.contains("out/tmp")),
        Err(e) => panic!("Expected Config error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn malformed_toml_returns_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[options.watcher\nroots = ").unwrap();

    assert!(matches!(
        load_and_validate(file.path()),
        Err(WatchError::Toml(_))
    ));
}

#[test]
fn missing_file_returns_io_error() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        load_and_validate(dir.path().join("nope.toml")),
        Err(WatchError::Io(_))
    ));
}
