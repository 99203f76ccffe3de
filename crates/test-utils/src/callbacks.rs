use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::Notify;
use treewatch::watch::{CallbackFuture, ReloadCallback};

/// A reload callback that:
/// - counts how often it was invoked
/// - wakes anyone waiting in [`CountingCallback::invoked`]
/// - optionally fails starting from the n-th call.
#[derive(Debug, Clone, Default)]
pub struct CountingCallback {
    calls: Arc<AtomicUsize>,
    notify: Arc<Notify>,
    fail_from: Option<usize>,
}

impl CountingCallback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return an error on the `n`-th invocation (1-based) and after.
    pub fn failing_from(n: usize) -> Self {
        Self {
            fail_from: Some(n),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Wait until the callback has been invoked at least `n` times.
    pub async fn invoked(&self, n: usize) {
        loop {
            let notified = self.notify.notified();
            if self.calls() >= n {
                return;
            }
            notified.await;
        }
    }
}

impl ReloadCallback for CountingCallback {
    fn on_change(&self) -> CallbackFuture<'_> {
        Box::pin(async move {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.notify.notify_waiters();
            match self.fail_from {
                Some(n) if call >= n => Err(anyhow!("callback failure on call {call}")),
                _ => Ok(()),
            }
        })
    }
}
