// ── Controller abstraction ──
//
// Facade over the topology server: reload (fetch → aggregate → commit),
// typed create commands, and an optional periodic background reload.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use topo_api::{NewCluster, NewEnvironment, NewSite, NewSyncCluster, TopologyClient};

use crate::aggregate::aggregate;
use crate::command::{
    Command, CreateClusterRequest, CreateEnvironmentRequest, CreateSiteRequest,
    CreateSyncClusterRequest,
};
use crate::config::ControllerConfig;
use crate::error::CoreError;
use crate::model::{ClusterId, ClusterTypeId, EnvironmentId, EnvironmentTypeId, SiteId};
use crate::source::TopologySource;
use crate::store::{TopologySnapshot, TopologyStore};
use crate::stream::SnapshotStream;

/// How a reload ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The snapshot was committed under this generation.
    Committed(u64),
    /// A newer reload committed first; this generation was discarded.
    Superseded(u64),
}

impl ReloadOutcome {
    pub fn generation(self) -> u64 {
        match self {
            Self::Committed(g) | Self::Superseded(g) => g,
        }
    }

    pub fn is_committed(self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

// ── Controller ───────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Readers go straight to the
/// [`TopologyStore`]; writers go through [`execute`](Self::execute).
pub struct Controller<S: TopologySource = TopologyClient> {
    inner: Arc<ControllerInner<S>>,
}

impl<S: TopologySource> Clone for Controller<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ControllerInner<S> {
    config: ControllerConfig,
    source: S,
    store: Arc<TopologyStore>,
    /// Last generation ticket handed out.
    generation: AtomicU64,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Controller<TopologyClient> {
    /// Create a controller backed by the HTTP client. Does not fetch
    /// anything; call [`start()`](Self::start) or [`reload()`](Self::reload).
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let client = TopologyClient::new(config.url.clone(), &config.transport())?;
        Ok(Self::with_source(config, client))
    }

    /// One-shot: load once, run the closure, tear down.
    ///
    /// Meant for single CLI invocations; background refresh is never started.
    pub async fn oneshot<F, Fut, T>(config: ControllerConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Controller) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.refresh_interval_secs = 0;

        let controller = Controller::new(cfg)?;
        controller.reload().await?;
        let result = f(controller.clone()).await;
        controller.shutdown().await;
        result
    }
}

impl<S: TopologySource> Controller<S> {
    /// Create a controller over any data source.
    pub fn with_source(config: ControllerConfig, source: S) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                config,
                source,
                store: Arc::new(TopologyStore::new()),
                generation: AtomicU64::new(0),
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<TopologyStore> {
        &self.inner.store
    }

    /// The currently committed snapshot.
    pub fn snapshot(&self) -> Arc<TopologySnapshot> {
        self.inner.store.snapshot()
    }

    pub fn subscribe(&self) -> SnapshotStream {
        self.inner.store.subscribe()
    }

    pub async fn wait_until_hydrated(&self) -> Arc<TopologySnapshot> {
        self.inner.store.wait_until_hydrated().await
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Perform the initial reload and spawn the periodic refresh task
    /// when `refresh_interval_secs` is non-zero.
    pub async fn start(&self) -> Result<(), CoreError> {
        self.reload().await?;

        let interval_secs = self.inner.config.refresh_interval_secs;
        if interval_secs > 0 {
            let handle = tokio::spawn(refresh_task(
                self.clone(),
                interval_secs,
                self.inner.cancel.child_token(),
            ));
            self.inner.task_handles.lock().await.push(handle);
            debug!(interval_secs, "periodic refresh started");
        }
        Ok(())
    }

    /// Cancel background tasks and wait for them to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("controller shut down");
    }

    // ── Reload ───────────────────────────────────────────────────

    /// Fetch all six collections, aggregate them and commit the result.
    ///
    /// All fetches must succeed before anything is published; on failure
    /// the previously committed snapshot stays in place.
    pub async fn reload(&self) -> Result<ReloadOutcome, CoreError> {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let source = &self.inner.source;
        debug!(generation, "reload started");

        let (sites, environments, clusters, sync_clusters, environment_types, cluster_types) =
            tokio::try_join!(
                fetch("sites", source.fetch_sites()),
                fetch("environments", source.fetch_environments()),
                fetch("clusters", source.fetch_clusters()),
                fetch("sync-clusters", source.fetch_sync_clusters()),
                fetch("environment types", source.fetch_environment_types()),
                fetch("cluster types", source.fetch_cluster_types()),
            )
            .inspect_err(|e| warn!(generation, error = %e, "reload aborted"))?;

        let aggregation = aggregate(&sites, &environments, &clusters, &sync_clusters);
        let snapshot = TopologySnapshot::from_parts(
            generation,
            aggregation,
            environment_types.into_iter().map(Into::into).collect(),
            cluster_types.into_iter().map(Into::into).collect(),
            Utc::now(),
        );

        let (site_count, cluster_count) = (snapshot.site_count(), snapshot.cluster_count());
        if self.inner.store.commit(snapshot) {
            info!(
                generation,
                sites = site_count,
                clusters = cluster_count,
                "topology reloaded"
            );
            Ok(ReloadOutcome::Committed(generation))
        } else {
            debug!(generation, "reload superseded by a newer commit");
            Ok(ReloadOutcome::Superseded(generation))
        }
    }

    // ── Command execution ────────────────────────────────────────

    /// Execute a create command, then reload on success.
    ///
    /// On failure nothing is reloaded and the store is left untouched.
    pub async fn execute(&self, cmd: Command) -> Result<ReloadOutcome, CoreError> {
        let cmd = cmd.validated()?;
        let operation = cmd.operation();
        let source = &self.inner.source;
        debug!(operation, name = cmd.name(), "executing command");

        let result = match &cmd {
            Command::CreateSite(req) => source.create_site(&NewSite::remote(&req.name)).await,
            Command::CreateEnvironment(req) => {
                source
                    .create_environment(&NewEnvironment {
                        name: req.name.clone(),
                        environment_type_id: req.environment_type_id.get(),
                        site_id: req.site_id.get(),
                    })
                    .await
            }
            Command::CreateCluster(req) => {
                source
                    .create_cluster(&NewCluster {
                        name: req.name.clone(),
                        cluster_type_id: req.cluster_type_id.get(),
                        env_id: req.env_id.get(),
                    })
                    .await
            }
            Command::CreateSyncCluster(req) => {
                source
                    .create_sync_cluster(
                        req.cluster_id.get(),
                        &NewSyncCluster {
                            name: req.name.clone(),
                        },
                    )
                    .await
            }
        };

        if let Err(e) = result {
            warn!(operation, error = %e, "create failed; store left unchanged");
            return Err(CoreError::mutation(operation, &e));
        }

        info!(operation, name = cmd.name(), "created; reloading topology");
        self.reload().await
    }

    pub async fn create_site(&self, name: impl Into<String>) -> Result<ReloadOutcome, CoreError> {
        self.execute(Command::CreateSite(CreateSiteRequest { name: name.into() }))
            .await
    }

    pub async fn create_environment(
        &self,
        site_id: SiteId,
        name: impl Into<String>,
        environment_type_id: EnvironmentTypeId,
    ) -> Result<ReloadOutcome, CoreError> {
        self.execute(Command::CreateEnvironment(CreateEnvironmentRequest {
            site_id,
            name: name.into(),
            environment_type_id,
        }))
        .await
    }

    pub async fn create_cluster(
        &self,
        env_id: EnvironmentId,
        name: impl Into<String>,
        cluster_type_id: ClusterTypeId,
    ) -> Result<ReloadOutcome, CoreError> {
        self.execute(Command::CreateCluster(CreateClusterRequest {
            env_id,
            name: name.into(),
            cluster_type_id,
        }))
        .await
    }

    pub async fn create_sync_cluster(
        &self,
        cluster_id: ClusterId,
        name: impl Into<String>,
    ) -> Result<ReloadOutcome, CoreError> {
        self.execute(Command::CreateSyncCluster(CreateSyncClusterRequest {
            cluster_id,
            name: name.into(),
        }))
        .await
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

async fn fetch<T>(
    resource: &'static str,
    request: impl Future<Output = Result<Vec<T>, topo_api::Error>>,
) -> Result<Vec<T>, CoreError> {
    let records = request
        .await
        .map_err(|e| CoreError::fetch(resource, &e))?;
    debug!(resource, count = records.len(), "fetched");
    Ok(records)
}

// ── Background tasks ─────────────────────────────────────────────────

async fn refresh_task<S: TopologySource>(
    controller: Controller<S>,
    interval_secs: u64,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = controller.reload().await {
                    warn!(error = %e, "periodic reload failed");
                }
            }
        }
    }
}
