// src/watch/watcher.rs

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::config::WatcherConfig;
use crate::errors::{Result, WatchError};
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::diff::{compare_recorded, ChangeSet};
use crate::watch::filter::PathFilter;
use crate::watch::report::report;
use crate::watch::snapshot::{Snapshot, SnapshotBuilder};

/// Pause between two ticks of the poll loop.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

pub type CallbackFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;

/// Invoked after a tick that found changes.
///
/// The callback is not told what changed; the reporter's log lines are the
/// record of that. An error returned here stops the poll loop, so callbacks
/// that should keep the watcher alive must handle their own failures.
pub trait ReloadCallback: Send + Sync {
    fn on_change(&self) -> CallbackFuture<'_>;
}

impl<F, Fut> ReloadCallback for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    fn on_change(&self) -> CallbackFuture<'_> {
        Box::pin(self())
    }
}

/// Polling change watcher.
///
/// Owns the last known snapshot. Construction seeds it without reporting
/// anything; every tick replaces it once the tick has fully completed.
/// The seed counts as a recorded baseline even when it is empty, so files
/// created in an initially empty tree are reported as added.
pub struct Watcher {
    builder: Arc<SnapshotBuilder>,
    display_root: PathBuf,
    baseline: Snapshot,
    poll_interval: Duration,
}

impl std::fmt::Debug for Watcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watcher")
            .field("roots", &self.builder.roots())
            .field("files", &self.baseline.len())
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl Watcher {
    /// Watch the real filesystem.
    pub fn new(config: WatcherConfig) -> Result<Self> {
        Self::with_fs(config, Arc::new(RealFileSystem))
    }

    /// Resolve every root and take the seed snapshot.
    ///
    /// A root that cannot be canonicalized or listed is reported as
    /// [`WatchError::RootInaccessible`]; nothing is retried later.
    pub fn with_fs(config: WatcherConfig, fs: Arc<dyn FileSystem>) -> Result<Self> {
        if config.roots.is_empty() {
            return Err(WatchError::Config(
                "at least one watch root is required".to_string(),
            ));
        }

        let mut roots = Vec::with_capacity(config.roots.len());
        for root in &config.roots {
            roots.push(resolve_root(fs.as_ref(), root)?);
        }
        let display_root = roots[0].clone();

        let filter = PathFilter::from_config(&config);
        let builder = SnapshotBuilder::new(fs, roots, filter);
        let baseline = builder.build()?;

        info!(
            roots = ?builder.roots(),
            ignored = ?builder.filter().ignored_dirs(),
            files = baseline.len(),
            "watcher initialised"
        );

        Ok(Self {
            builder: Arc::new(builder),
            display_root,
            baseline,
            poll_interval: POLL_INTERVAL,
        })
    }

    /// Override the pause between ticks.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        self.builder.roots()
    }

    /// First root; changed paths are displayed relative to it.
    pub fn display_root(&self) -> &Path {
        &self.display_root
    }

    /// The last known snapshot.
    pub fn baseline(&self) -> &Snapshot {
        &self.baseline
    }

    /// Walk the roots on the current thread.
    pub fn scan(&self) -> Result<Snapshot> {
        self.builder.build()
    }

    /// Synchronous one-shot: scan, diff against the baseline, store the new
    /// snapshot and return what changed. Nothing is logged or invoked.
    pub fn update(&mut self) -> Result<ChangeSet> {
        let current = self.scan()?;
        let (changes, next) = compare_recorded(&self.baseline, current, &self.display_root);
        self.baseline = next;
        Ok(changes)
    }

    async fn scan_blocking(&self) -> Result<Snapshot> {
        let builder = Arc::clone(&self.builder);
        tokio::task::spawn_blocking(move || builder.build()).await?
    }

    /// Run a single tick: scan off the async threads, diff, report and await
    /// the callback if anything changed, then replace the baseline.
    ///
    /// On error the baseline is left untouched.
    pub async fn tick(&mut self, callback: Option<&dyn ReloadCallback>) -> Result<ChangeSet> {
        let current = self.scan_blocking().await?;
        let (changes, next) = compare_recorded(&self.baseline, current, &self.display_root);

        if changes.is_empty() {
            debug!(files = next.len(), "no changes");
        } else {
            report(&changes);
            if let Some(callback) = callback {
                debug!(changes = changes.len(), "invoking reload callback");
                callback.on_change().await.map_err(WatchError::Callback)?;
            }
        }

        self.baseline = next;
        Ok(changes)
    }

    /// Poll until `cancel` fires or a tick fails.
    ///
    /// Cancellation is checked before every tick and raced against every
    /// sleep. A failed tick ends the loop; the error is logged once here and
    /// returned to the owner.
    pub async fn run(
        mut self,
        callback: Option<Arc<dyn ReloadCallback>>,
        cancel: CancellationToken,
    ) -> Result<()> {
        info!(
            roots = ?self.roots(),
            interval_ms = self.poll_interval.as_millis() as u64,
            "watching for changes"
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            if let Err(err) = self.tick(callback.as_deref()).await {
                error!(error = %err, "watcher stopped");
                return Err(err);
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }

        info!("watcher cancelled");
        Ok(())
    }

    /// Run the poll loop as a background Tokio task.
    pub fn spawn(self, callback: Option<Arc<dyn ReloadCallback>>) -> WatchHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.run(callback, cancel.clone()));
        WatchHandle { cancel, task }
    }
}

fn resolve_root(fs: &dyn FileSystem, root: &Path) -> Result<PathBuf> {
    let inaccessible = |source: io::Error| WatchError::RootInaccessible {
        path: root.to_path_buf(),
        source,
    };
    let canonical = fs.canonicalize(root).map_err(inaccessible)?;
    fs.read_dir(&canonical).map_err(inaccessible)?;
    Ok(canonical)
}

/// Handle for a spawned poll loop.
///
/// Dropping the handle does not stop the loop; call [`WatchHandle::cancel`]
/// or [`WatchHandle::shutdown`].
pub struct WatchHandle {
    cancel: CancellationToken,
    task: JoinHandle<Result<()>>,
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("finished", &self.task.is_finished())
            .finish()
    }
}

impl WatchHandle {
    /// Request cancellation; no new tick starts afterwards.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the loop to end on its own (a failed tick or an external
    /// cancel). Must not be called again once it has returned.
    pub async fn wait(&mut self) -> Result<()> {
        (&mut self.task).await?
    }

    /// Wait for the loop to end without cancelling it.
    pub async fn join(self) -> Result<()> {
        self.task.await?
    }

    /// Cancel and wait for the loop's final result.
    pub async fn shutdown(self) -> Result<()> {
        self.cancel.cancel();
        self.join().await
    }
}
