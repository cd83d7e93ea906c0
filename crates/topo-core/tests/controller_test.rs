#![allow(clippy::unwrap_used)]
// Integration tests for `Controller` over an in-memory topology source.

use std::future::{Future, ready};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use tokio::sync::Notify;
use url::Url;

use topo_api::{
    ClusterRecord, ClusterTypeRecord, EnvironmentRecord, EnvironmentTypeRecord, Error, NewCluster,
    NewEnvironment, NewSite, NewSyncCluster, SiteRecord, SyncClusterRecord,
};
use topo_core::{
    ClusterId, ClusterTypeId, Command, Controller, ControllerConfig, CoreError, CreationForm,
    EnvironmentId, EnvironmentTypeId, FormMode, ReloadOutcome, SiteId, TopologySource,
};

// ── Fake source ─────────────────────────────────────────────────────

#[derive(Default)]
struct Server {
    sites: Vec<SiteRecord>,
    environments: Vec<EnvironmentRecord>,
    clusters: Vec<ClusterRecord>,
    sync_clusters: Vec<SyncClusterRecord>,
    next_id: u64,
    /// Resource name whose fetch fails with 503.
    fail_fetch: Option<&'static str>,
    /// Status every create call fails with.
    fail_creates: Option<u16>,
    /// Gate the next sites fetch waits on (taken by the first caller).
    sites_gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

#[derive(Clone, Default)]
struct FakeSource {
    server: Arc<Mutex<Server>>,
    reloads: Arc<AtomicUsize>,
    creates: Arc<AtomicUsize>,
}

impl FakeSource {
    fn seeded() -> Self {
        let source = Self::default();
        {
            let mut s = source.server.lock().unwrap();
            s.next_id = 5000;
            s.sites = vec![
                SiteRecord {
                    id: 1,
                    name: "HQ".into(),
                    physical_location: "Y".into(),
                },
                SiteRecord {
                    id: 2,
                    name: "DR".into(),
                    physical_location: "N".into(),
                },
            ];
            s.environments = vec![
                EnvironmentRecord {
                    id: 10,
                    name: "prod".into(),
                    site_id: 1,
                    environment_type_id: 1,
                },
                EnvironmentRecord {
                    id: 20,
                    name: "dr".into(),
                    site_id: 2,
                    environment_type_id: 1,
                },
            ];
            s.clusters = vec![ClusterRecord {
                id: 100,
                name: "c1".into(),
                env_id: 10,
                cluster_type_id: 3,
            }];
            s.sync_clusters = vec![SyncClusterRecord {
                id: 1000,
                name: "sync1".into(),
                send_id: 100,
            }];
        }
        source
    }

    fn with<R>(&self, f: impl FnOnce(&mut Server) -> R) -> R {
        f(&mut self.server.lock().unwrap())
    }

    fn list<T: Clone>(
        &self,
        resource: &'static str,
        pick: impl FnOnce(&Server) -> Vec<T>,
    ) -> Result<Vec<T>, Error> {
        let s = self.server.lock().unwrap();
        if s.fail_fetch == Some(resource) {
            return Err(Error::Api {
                status: 503,
                message: format!("{resource} unavailable"),
            });
        }
        Ok(pick(&s))
    }

    fn create(&self, apply: impl FnOnce(&mut Server, u64)) -> Result<(), Error> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let mut s = self.server.lock().unwrap();
        if let Some(status) = s.fail_creates {
            return Err(Error::Api {
                status,
                message: "rejected".into(),
            });
        }
        s.next_id += 1;
        let id = s.next_id;
        apply(&mut s, id);
        Ok(())
    }
}

impl TopologySource for FakeSource {
    fn fetch_sites(&self) -> impl Future<Output = Result<Vec<SiteRecord>, Error>> + Send {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        let gate = self.with(|s| s.sites_gate.take());
        let this = self.clone();
        async move {
            if let Some((entered, release)) = gate {
                entered.notify_one();
                release.notified().await;
            }
            this.list("sites", |s| s.sites.clone())
        }
    }

    fn fetch_environments(
        &self,
    ) -> impl Future<Output = Result<Vec<EnvironmentRecord>, Error>> + Send {
        ready(self.list("environments", |s| s.environments.clone()))
    }

    fn fetch_clusters(&self) -> impl Future<Output = Result<Vec<ClusterRecord>, Error>> + Send {
        ready(self.list("clusters", |s| s.clusters.clone()))
    }

    fn fetch_sync_clusters(
        &self,
    ) -> impl Future<Output = Result<Vec<SyncClusterRecord>, Error>> + Send {
        ready(self.list("sync-clusters", |s| s.sync_clusters.clone()))
    }

    fn fetch_environment_types(
        &self,
    ) -> impl Future<Output = Result<Vec<EnvironmentTypeRecord>, Error>> + Send {
        ready(self.list("environment-types", |_| {
            vec![EnvironmentTypeRecord {
                id: 1,
                name: "production".into(),
            }]
        }))
    }

    fn fetch_cluster_types(
        &self,
    ) -> impl Future<Output = Result<Vec<ClusterTypeRecord>, Error>> + Send {
        ready(self.list("cluster-types", |_| {
            vec![ClusterTypeRecord {
                id: 3,
                name: "kafka".into(),
            }]
        }))
    }

    fn create_site(&self, site: &NewSite) -> impl Future<Output = Result<(), Error>> + Send {
        let site = site.clone();
        ready(self.create(|s, id| {
            s.sites.push(SiteRecord {
                id,
                name: site.name,
                physical_location: site.physical_location,
            });
        }))
    }

    fn create_environment(
        &self,
        env: &NewEnvironment,
    ) -> impl Future<Output = Result<(), Error>> + Send {
        let env = env.clone();
        ready(self.create(|s, id| {
            s.environments.push(EnvironmentRecord {
                id,
                name: env.name,
                site_id: env.site_id,
                environment_type_id: env.environment_type_id,
            });
        }))
    }

    fn create_cluster(
        &self,
        cluster: &NewCluster,
    ) -> impl Future<Output = Result<(), Error>> + Send {
        let cluster = cluster.clone();
        ready(self.create(|s, id| {
            s.clusters.push(ClusterRecord {
                id,
                name: cluster.name,
                env_id: cluster.env_id,
                cluster_type_id: cluster.cluster_type_id,
            });
        }))
    }

    fn create_sync_cluster(
        &self,
        cluster_id: u64,
        sync: &NewSyncCluster,
    ) -> impl Future<Output = Result<(), Error>> + Send {
        let sync = sync.clone();
        ready(self.create(|s, id| {
            s.sync_clusters.push(SyncClusterRecord {
                id,
                name: sync.name,
                send_id: cluster_id,
            });
        }))
    }
}

fn controller(source: &FakeSource) -> Controller<FakeSource> {
    let config = ControllerConfig::new(Url::parse("http://topology.test").unwrap());
    Controller::with_source(config, source.clone())
}

// ── Reload ──────────────────────────────────────────────────────────

#[tokio::test]
async fn reload_commits_aggregated_snapshot() {
    let source = FakeSource::seeded();
    let ctrl = controller(&source);

    let outcome = ctrl.reload().await.unwrap();
    assert_eq!(outcome, ReloadOutcome::Committed(1));

    let snap = ctrl.snapshot();
    assert_eq!(snap.generation, 1);
    assert_eq!(snap.local_site.as_ref().unwrap().name, "HQ");
    assert_eq!(snap.remote_sites.len(), 1);
    assert_eq!(snap.sync_cluster_count(), 1);
    assert_eq!(snap.environment_types[0].name, "production");
    assert!(snap.refreshed_at.is_some());
}

#[tokio::test]
async fn fetch_failure_keeps_previous_snapshot() {
    let source = FakeSource::seeded();
    let ctrl = controller(&source);
    ctrl.reload().await.unwrap();
    let before = ctrl.snapshot();

    source.with(|s| s.fail_fetch = Some("clusters"));
    let err = ctrl.reload().await.unwrap_err();

    match err {
        CoreError::Fetch {
            resource,
            status,
            transient,
            ..
        } => {
            assert_eq!(resource, "clusters");
            assert_eq!(status, Some(503));
            assert!(transient);
        }
        other => panic!("expected Fetch error, got: {other:?}"),
    }
    assert!(Arc::ptr_eq(&before, &ctrl.snapshot()));
}

#[tokio::test]
async fn stale_reload_is_not_committed() {
    let source = FakeSource::seeded();
    let ctrl = controller(&source);

    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    source.with(|s| s.sites_gate = Some((Arc::clone(&entered), Arc::clone(&release))));

    // Generation 1 parks inside its sites fetch.
    let slow = {
        let ctrl = ctrl.clone();
        tokio::spawn(async move { ctrl.reload().await })
    };
    entered.notified().await;

    // Generation 2 runs to completion with newer data.
    source.with(|s| s.sites[1].name = "DR-renamed".into());
    assert_eq!(ctrl.reload().await.unwrap(), ReloadOutcome::Committed(2));

    release.notify_one();
    let outcome = slow.await.unwrap().unwrap();
    assert_eq!(outcome, ReloadOutcome::Superseded(1));

    let snap = ctrl.snapshot();
    assert_eq!(snap.generation, 2);
    assert_eq!(snap.remote_sites[&SiteId::new(2)].name, "DR-renamed");
}

#[tokio::test]
async fn subscribers_observe_reload() {
    let source = FakeSource::seeded();
    let ctrl = controller(&source);
    let mut stream = ctrl.subscribe();

    ctrl.reload().await.unwrap();
    let snap = stream.changed().await.unwrap();
    assert!(snap.is_hydrated());
}

#[tokio::test]
async fn wait_until_hydrated_after_start() {
    let source = FakeSource::seeded();
    let ctrl = controller(&source);

    let waiter = {
        let ctrl = ctrl.clone();
        tokio::spawn(async move { ctrl.wait_until_hydrated().await })
    };
    ctrl.start().await.unwrap();

    let snap = waiter.await.unwrap();
    assert_eq!(snap.site_count(), 2);
    ctrl.shutdown().await;
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn create_cluster_reloads_with_new_cluster() {
    let source = FakeSource::seeded();
    let ctrl = controller(&source);
    ctrl.reload().await.unwrap();

    let outcome = ctrl
        .create_cluster(EnvironmentId::new(10), "c2", ClusterTypeId::new(3))
        .await
        .unwrap();
    assert_eq!(outcome, ReloadOutcome::Committed(2));
    assert_eq!(source.reloads.load(Ordering::SeqCst), 2);

    let names: Vec<String> = ctrl
        .store()
        .clusters_for_environment(EnvironmentId::new(10))
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["c1", "c2"]);
}

#[tokio::test]
async fn failed_create_leaves_store_unchanged() {
    let source = FakeSource::seeded();
    let ctrl = controller(&source);
    ctrl.reload().await.unwrap();
    let before = ctrl.snapshot();

    source.with(|s| s.fail_creates = Some(409));
    let err = ctrl
        .create_cluster(EnvironmentId::new(10), "c2", ClusterTypeId::new(3))
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            CoreError::Mutation {
                operation: "create_cluster",
                status: Some(409),
                ..
            }
        ),
        "unexpected error: {err:?}"
    );
    assert_eq!(source.reloads.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&before, &ctrl.snapshot()));
}

#[tokio::test]
async fn blank_name_never_reaches_the_server() {
    let source = FakeSource::seeded();
    let ctrl = controller(&source);

    let err = ctrl.create_site("   ").await.unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { .. }));
    assert_eq!(source.creates.load(Ordering::SeqCst), 0);
    assert_eq!(source.reloads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn created_site_is_remote_and_trimmed() {
    let source = FakeSource::seeded();
    let ctrl = controller(&source);

    ctrl.create_site("  edge-1 ").await.unwrap();

    let snap = ctrl.snapshot();
    let edge = snap
        .remote_sites
        .values()
        .find(|s| s.name == "edge-1")
        .unwrap();
    assert!(!edge.is_local());
    assert_eq!(snap.local_site.as_ref().unwrap().name, "HQ");
}

#[tokio::test]
async fn create_environment_and_sync_cluster() {
    let source = FakeSource::seeded();
    let ctrl = controller(&source);

    ctrl.create_environment(SiteId::new(2), "dr-qa", EnvironmentTypeId::new(1))
        .await
        .unwrap();
    ctrl.create_sync_cluster(ClusterId::new(100), "sync2")
        .await
        .unwrap();

    let snap = ctrl.snapshot();
    let dr_envs: Vec<&str> = snap
        .environments_for_site(SiteId::new(2))
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(dr_envs, vec!["dr", "dr-qa"]);
    assert_eq!(
        snap.cluster(ClusterId::new(100)).unwrap().sync_clusters.len(),
        2
    );
}

// ── Form → controller ───────────────────────────────────────────────

#[tokio::test]
async fn form_submission_executes_and_resets() {
    let source = FakeSource::seeded();
    let ctrl = controller(&source);
    ctrl.reload().await.unwrap();

    let mut form = CreationForm::new(FormMode::SyncCluster);
    let snap = ctrl.snapshot();
    form.select_site(&snap, Some(SiteId::new(1))).unwrap();
    form.select_environment(&snap, Some(EnvironmentId::new(10)))
        .unwrap();
    form.select_cluster(Some(ClusterId::new(100))).unwrap();
    form.set_name("sync-b");

    let cmd = form.submission().unwrap();
    assert!(matches!(cmd, Command::CreateSyncCluster(_)));
    ctrl.execute(cmd).await.unwrap();
    form.reset();

    assert_eq!(form, CreationForm::new(FormMode::SyncCluster));
    assert_eq!(ctrl.snapshot().sync_cluster_count(), 2);
}
