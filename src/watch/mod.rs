// src/watch/mod.rs

//! Polling change detection.
//!
//! This module is responsible for:
//! - Deciding which files are monitored (`filter`).
//! - Walking the roots into an immutable `Snapshot` (`snapshot`).
//! - Comparing two snapshots (`diff`) and summarising the result (`report`).
//! - Running the cancellable poll loop that ties it together (`watcher`).
//!
//! There is no OS notification involved: every tick is a full tree walk.

pub mod diff;
pub mod filter;
pub mod path_utils;
pub mod report;
pub mod snapshot;
pub mod watcher;

pub use diff::{compare, compare_recorded, ChangeKind, ChangeSet};
pub use filter::PathFilter;
pub use path_utils::display_path;
pub use report::{display_list, report, summarize, CategorySummary, ELLIPSIS};
pub use snapshot::{Snapshot, SnapshotBuilder};
pub use watcher::{CallbackFuture, ReloadCallback, WatchHandle, Watcher, POLL_INTERVAL};
