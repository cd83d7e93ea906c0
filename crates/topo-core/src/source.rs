// ── Data access seam ──
//
// The controller talks to the server only through `TopologySource`, so
// reload and mutation logic can run against an in-memory source in tests.

use std::future::Future;

use topo_api::{
    ClusterRecord, ClusterTypeRecord, EnvironmentRecord, EnvironmentTypeRecord, Error, NewCluster,
    NewEnvironment, NewSite, NewSyncCluster, SiteRecord, SyncClusterRecord, TopologyClient,
};

/// The ten data-access operations the controller depends on.
pub trait TopologySource: Send + Sync + 'static {
    fn fetch_sites(&self) -> impl Future<Output = Result<Vec<SiteRecord>, Error>> + Send;

    fn fetch_environments(
        &self,
    ) -> impl Future<Output = Result<Vec<EnvironmentRecord>, Error>> + Send;

    fn fetch_clusters(&self) -> impl Future<Output = Result<Vec<ClusterRecord>, Error>> + Send;

    fn fetch_sync_clusters(
        &self,
    ) -> impl Future<Output = Result<Vec<SyncClusterRecord>, Error>> + Send;

    fn fetch_environment_types(
        &self,
    ) -> impl Future<Output = Result<Vec<EnvironmentTypeRecord>, Error>> + Send;

    fn fetch_cluster_types(
        &self,
    ) -> impl Future<Output = Result<Vec<ClusterTypeRecord>, Error>> + Send;

    fn create_site(&self, site: &NewSite) -> impl Future<Output = Result<(), Error>> + Send;

    fn create_environment(
        &self,
        env: &NewEnvironment,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    fn create_cluster(&self, cluster: &NewCluster)
    -> impl Future<Output = Result<(), Error>> + Send;

    fn create_sync_cluster(
        &self,
        cluster_id: u64,
        sync: &NewSyncCluster,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

impl TopologySource for TopologyClient {
    fn fetch_sites(&self) -> impl Future<Output = Result<Vec<SiteRecord>, Error>> + Send {
        self.list_sites()
    }

    fn fetch_environments(
        &self,
    ) -> impl Future<Output = Result<Vec<EnvironmentRecord>, Error>> + Send {
        self.list_environments()
    }

    fn fetch_clusters(&self) -> impl Future<Output = Result<Vec<ClusterRecord>, Error>> + Send {
        self.list_clusters()
    }

    fn fetch_sync_clusters(
        &self,
    ) -> impl Future<Output = Result<Vec<SyncClusterRecord>, Error>> + Send {
        self.list_sync_clusters()
    }

    fn fetch_environment_types(
        &self,
    ) -> impl Future<Output = Result<Vec<EnvironmentTypeRecord>, Error>> + Send {
        self.list_environment_types()
    }

    fn fetch_cluster_types(
        &self,
    ) -> impl Future<Output = Result<Vec<ClusterTypeRecord>, Error>> + Send {
        self.list_cluster_types()
    }

    fn create_site(&self, site: &NewSite) -> impl Future<Output = Result<(), Error>> + Send {
        TopologyClient::create_site(self, site)
    }

    fn create_environment(
        &self,
        env: &NewEnvironment,
    ) -> impl Future<Output = Result<(), Error>> + Send {
        TopologyClient::create_environment(self, env)
    }

    fn create_cluster(
        &self,
        cluster: &NewCluster,
    ) -> impl Future<Output = Result<(), Error>> + Send {
        TopologyClient::create_cluster(self, cluster)
    }

    fn create_sync_cluster(
        &self,
        cluster_id: u64,
        sync: &NewSyncCluster,
    ) -> impl Future<Output = Result<(), Error>> + Send {
        TopologyClient::create_sync_cluster(self, cluster_id, sync)
    }
}
