// src/watch/report.rs

//! Bounded, log-friendly summaries of a [`ChangeSet`].
//!
//! Each category shows at most two real names. When a category has three or
//! more entries, the third slot becomes [`ELLIPSIS`] and the rest is dropped,
//! so a category with exactly three changes still shows only two names. The
//! `total` field on each summary carries the real count.

use std::fmt;

use tracing::warn;

use crate::watch::diff::{ChangeKind, ChangeSet};

/// Marker that replaces the third entry of a long category.
pub const ELLIPSIS: &str = "...";

/// Real names shown per category before truncation kicks in.
pub const MAX_DISPLAY_NAMES: usize = 2;

/// Log target for change reports.
pub const REPORT_TARGET: &str = "treewatch::files";

/// Categories in the order they are reported.
const REPORT_ORDER: [ChangeKind; 3] = [ChangeKind::Removed, ChangeKind::Added, ChangeKind::Updated];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub kind: ChangeKind,
    /// Number of changed paths in the category before truncation.
    pub total: usize,
    pub entries: Vec<String>,
}

impl fmt::Display for CategorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.entries.join(", "))
    }
}

/// Truncate a category to its display form.
pub fn display_list(paths: &[String]) -> Vec<String> {
    if paths.len() <= MAX_DISPLAY_NAMES {
        return paths.to_vec();
    }
    let mut shown: Vec<String> = paths[..MAX_DISPLAY_NAMES].to_vec();
    shown.push(ELLIPSIS.to_string());
    shown
}

/// One summary per non-empty category: removed, then added, then updated.
pub fn summarize(changes: &ChangeSet) -> Vec<CategorySummary> {
    REPORT_ORDER
        .iter()
        .filter_map(|&kind| {
            let paths = changes.category(kind);
            if paths.is_empty() {
                return None;
            }
            Some(CategorySummary {
                kind,
                total: paths.len(),
                entries: display_list(paths),
            })
        })
        .collect()
}

/// Emit one warning per non-empty category.
pub fn report(changes: &ChangeSet) {
    for summary in summarize(changes) {
        warn!(
            target: REPORT_TARGET,
            category = %summary.kind,
            total = summary.total,
            "{}",
            summary
        );
    }
}
