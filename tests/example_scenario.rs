mod common;
use crate::common::mock_watcher;

use std::error::Error;

use treewatch::fs::mock::MockFileSystem;

type TestResult = Result<(), Box<dyn Error>>;

/// roots = ["/proj"], ignored_dirs = ["build"], only `.py` files involved.
#[test]
fn five_tick_walkthrough() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("/proj/a.py");

    let mut watcher = mock_watcher(&fs, &["build"]);

    // Tick 1: the seed snapshot is the baseline; nothing to report.
    assert!(watcher.update()?.is_empty());

    // Tick 2: a file inside an ignored directory.
    fs.add_file("/proj/build/b.py");
    assert!(watcher.update()?.is_empty());

    // Tick 3: a new qualifying file.
    fs.add_file("/proj/c.py");
    let changes = watcher.update()?;
    assert_eq!(changes.added, vec!["c.py"]);
    assert!(changes.removed.is_empty());
    assert!(changes.updated.is_empty());

    // Tick 4: only the mtime of a known file changes.
    fs.touch("/proj/a.py");
    let changes = watcher.update()?;
    assert_eq!(changes.updated, vec!["a.py"]);
    assert!(changes.added.is_empty());
    assert!(changes.removed.is_empty());

    // Tick 5: the new file is deleted again.
    fs.remove("/proj/c.py");
    let changes = watcher.update()?;
    assert_eq!(changes.removed, vec!["c.py"]);
    assert!(changes.added.is_empty());
    assert!(changes.updated.is_empty());

    Ok(())
}

#[test]
fn first_diff_is_empty_however_many_files_exist() -> TestResult {
    let fs = MockFileSystem::new();
    for i in 0..50 {
        fs.add_file(format!("/proj/pkg{}/mod{}.py", i % 5, i));
    }

    let mut watcher = mock_watcher(&fs, &[]);
    assert_eq!(watcher.baseline().len(), 50);
    assert!(watcher.update()?.is_empty());
    Ok(())
}

#[test]
fn first_file_in_an_empty_tree_is_reported() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_dir("/proj");

    let mut watcher = mock_watcher(&fs, &[]);
    assert!(watcher.baseline().is_empty());
    assert!(watcher.update()?.is_empty());

    fs.add_file("/proj/new.py");
    assert_eq!(watcher.update()?.added, vec!["new.py"]);
    Ok(())
}

#[test]
fn file_recreated_after_all_files_were_deleted_is_reported() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("/proj/a.py");
    let mut watcher = mock_watcher(&fs, &[]);

    fs.remove("/proj/a.py");
    assert_eq!(watcher.update()?.removed, vec!["a.py"]);

    fs.add_file("/proj/a.py");
    assert_eq!(watcher.update()?.added, vec!["a.py"]);
    Ok(())
}

#[test]
fn unreadable_subdirectory_does_not_prevent_startup() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("/proj/a.py");
    fs.add_file("/proj/data/x.json");
    fs.deny("/proj/data");

    let mut watcher = mock_watcher(&fs, &[]);
    assert_eq!(watcher.baseline().display_paths(watcher.display_root()), vec!["a.py"]);

    fs.add_file("/proj/b.py");
    assert_eq!(watcher.update()?.added, vec!["b.py"]);
    Ok(())
}

#[test]
fn non_allow_listed_and_hidden_files_never_show_up() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("/proj/a.py");
    let mut watcher = mock_watcher(&fs, &[]);

    fs.add_file("/proj/notes.txt");
    fs.add_file("/proj/.env.json");
    fs.add_file("/proj/.git/hooks/pre-commit.py");
    fs.add_file("/proj/pkg/__pycache__/a.py");
    assert!(watcher.update()?.is_empty());

    fs.touch("/proj/notes.txt");
    assert!(watcher.update()?.is_empty());
    Ok(())
}

#[test]
fn mygitrepo_is_not_mistaken_for_an_ignored_dir() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("/proj/a.py");
    let mut watcher = mock_watcher(&fs, &["git"]);

    fs.add_file("/proj/mygitrepo/app.py");
    fs.add_file("/proj/git/skipped.py");
    assert_eq!(watcher.update()?.added, vec!["mygitrepo/app.py"]);
    Ok(())
}

#[test]
fn vanished_file_is_treated_as_absent() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("/proj/a.py");
    let mut watcher = mock_watcher(&fs, &[]);

    fs.add_vanishing_file("/proj/tmp_write.py");
    assert!(watcher.update()?.is_empty());

    fs.add_file("/proj/tmp_write.py");
    assert_eq!(watcher.update()?.added, vec!["tmp_write.py"]);
    Ok(())
}
