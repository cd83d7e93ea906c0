// ── Reactive snapshot stream ──
//
// Subscription handle for consumers that redraw on every committed
// topology snapshot.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::TopologySnapshot;

/// A subscription to committed topology snapshots.
///
/// Provides point-in-time access plus change notification via
/// [`changed()`](Self::changed) or by converting into a `Stream`.
pub struct SnapshotStream {
    current: Arc<TopologySnapshot>,
    receiver: watch::Receiver<Arc<TopologySnapshot>>,
}

impl SnapshotStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<TopologySnapshot>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation time or at the last `changed()`.
    pub fn current(&self) -> &Arc<TopologySnapshot> {
        &self.current
    }

    /// The latest committed snapshot.
    pub fn latest(&self) -> Arc<TopologySnapshot> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next commit. Returns `None` once the store is dropped.
    pub async fn changed(&mut self) -> Option<Arc<TopologySnapshot>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    /// Convert into a `Stream` that yields the current snapshot first,
    /// then every subsequent commit.
    pub fn into_stream(self) -> SnapshotWatchStream {
        SnapshotWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by the store's `watch::Receiver`.
pub struct SnapshotWatchStream {
    inner: WatchStream<Arc<TopologySnapshot>>,
}

impl Stream for SnapshotWatchStream {
    type Item = Arc<TopologySnapshot>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
