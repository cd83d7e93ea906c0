// ── Topology state store ──
//
// Holds the current `TopologySnapshot` behind an `ArcSwap` so readers never
// block, and fans commits out over a `watch` channel for subscribers.
// Commits replace the whole snapshot in one pointer swap.

mod snapshot;

use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::watch;
use tracing::debug;

pub use snapshot::TopologySnapshot;

use crate::model::{Cluster, ClusterType, Environment, EnvironmentId, EnvironmentType, Site, SiteId};
use crate::stream::SnapshotStream;

/// Shared, versioned topology state.
pub struct TopologyStore {
    current: ArcSwap<TopologySnapshot>,
    publisher: watch::Sender<Arc<TopologySnapshot>>,
}

impl TopologyStore {
    pub fn new() -> Self {
        let initial = Arc::new(TopologySnapshot::default());
        let (publisher, _) = watch::channel(Arc::clone(&initial));
        Self {
            current: ArcSwap::new(initial),
            publisher,
        }
    }

    /// The currently committed snapshot.
    pub fn snapshot(&self) -> Arc<TopologySnapshot> {
        self.current.load_full()
    }

    /// Generation of the committed snapshot (0 before the first load).
    pub fn generation(&self) -> u64 {
        self.current.load().generation
    }

    /// Commit a freshly aggregated snapshot.
    ///
    /// Returns `false` without publishing when a snapshot of the same or a
    /// newer generation is already committed.
    pub fn commit(&self, snapshot: TopologySnapshot) -> bool {
        let next = Arc::new(snapshot);
        let mut current = self.current.load_full();

        loop {
            if current.generation >= next.generation {
                debug!(
                    committed = current.generation,
                    rejected = next.generation,
                    "stale snapshot rejected"
                );
                return false;
            }

            let previous = self.current.compare_and_swap(&current, Arc::clone(&next));
            if Arc::ptr_eq(&*previous, &current) {
                break;
            }
            current = arc_swap::Guard::into_inner(previous);
        }

        let generation = next.generation;
        self.publisher.send_if_modified(|published| {
            if published.generation < generation {
                *published = Arc::clone(&next);
                true
            } else {
                false
            }
        });

        debug!(generation, "snapshot committed");
        true
    }

    /// Subscribe to snapshot commits.
    pub fn subscribe(&self) -> SnapshotStream {
        SnapshotStream::new(self.publisher.subscribe())
    }

    /// Resolve once a snapshot holding at least one site is committed.
    pub async fn wait_until_hydrated(&self) -> Arc<TopologySnapshot> {
        let mut rx = self.publisher.subscribe();
        let hydrated = match rx.wait_for(|snap| snap.is_hydrated()).await {
            Ok(snap) => Some(Arc::clone(&*snap)),
            // Sender is owned by `self`, so this only happens on teardown.
            Err(_) => None,
        };
        hydrated.unwrap_or_else(|| self.snapshot())
    }

    // ── Owned-collection delegates ───────────────────────────────────

    pub fn all_sites(&self) -> Vec<Site> {
        self.snapshot().all_sites().into_iter().cloned().collect()
    }

    pub fn environments_for_site(&self, id: SiteId) -> Vec<Environment> {
        self.snapshot()
            .environments_for_site(id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn clusters_for_environment(&self, id: EnvironmentId) -> Vec<Cluster> {
        self.snapshot()
            .clusters_for_environment(id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn environment_types(&self) -> Vec<EnvironmentType> {
        self.snapshot().environment_types.clone()
    }

    pub fn cluster_types(&self) -> Vec<ClusterType> {
        self.snapshot().cluster_types.clone()
    }

    /// Time since the last successful commit.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.current
            .load()
            .refreshed_at
            .map(|at| chrono::Utc::now() - at)
    }
}

impl Default for TopologyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Locality;

    fn snapshot_with_site(generation: u64, name: &str) -> TopologySnapshot {
        let site = Site::new(SiteId::new(1), name, Locality::Local);
        TopologySnapshot {
            generation,
            local_site: Some(site),
            ..TopologySnapshot::default()
        }
    }

    #[test]
    fn commit_replaces_snapshot() {
        let store = TopologyStore::new();
        assert_eq!(store.generation(), 0);

        assert!(store.commit(snapshot_with_site(1, "HQ")));
        assert_eq!(store.generation(), 1);
        assert_eq!(store.all_sites()[0].name, "HQ");
    }

    #[test]
    fn older_generation_is_rejected() {
        let store = TopologyStore::new();
        assert!(store.commit(snapshot_with_site(3, "new")));
        assert!(!store.commit(snapshot_with_site(2, "old")));
        assert!(!store.commit(snapshot_with_site(3, "same")));

        let snap = store.snapshot();
        assert_eq!(snap.generation, 3);
        assert_eq!(snap.local_site.as_ref().unwrap().name, "new");
    }

    #[test]
    fn subscribers_see_commits() {
        let store = TopologyStore::new();
        let stream = store.subscribe();
        assert_eq!(stream.current().generation, 0);

        store.commit(snapshot_with_site(1, "HQ"));
        assert_eq!(stream.latest().generation, 1);
        assert_eq!(stream.current().generation, 0);
    }

    #[test]
    fn rejected_commit_is_not_published() {
        let store = TopologyStore::new();
        store.commit(snapshot_with_site(2, "HQ"));
        let stream = store.subscribe();
        store.commit(snapshot_with_site(1, "stale"));
        assert_eq!(stream.latest().generation, 2);
    }

    #[tokio::test]
    async fn wait_until_hydrated_resolves_after_commit() {
        let store = Arc::new(TopologyStore::new());
        let waiter = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.wait_until_hydrated().await })
        };

        tokio::task::yield_now().await;
        store.commit(snapshot_with_site(1, "HQ"));

        let snap = waiter.await.unwrap();
        assert!(snap.is_hydrated());
        assert_eq!(snap.generation, 1);
    }
}
