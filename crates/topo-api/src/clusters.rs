// Cluster and sync-cluster endpoints, plus the cluster-type catalog.

use tracing::debug;

use crate::client::TopologyClient;
use crate::error::Error;
use crate::models::{
    ClusterRecord, ClusterTypeRecord, NewCluster, NewSyncCluster, SyncClusterRecord,
};

impl TopologyClient {
    /// List every cluster across all environments.
    ///
    /// `GET /api/clusters`
    pub async fn list_clusters(&self) -> Result<Vec<ClusterRecord>, Error> {
        debug!("listing clusters");
        self.get("clusters").await
    }

    /// List every sync-cluster record.
    ///
    /// `GET /api/sync-clusters`
    pub async fn list_sync_clusters(&self) -> Result<Vec<SyncClusterRecord>, Error> {
        debug!("listing sync clusters");
        self.get("sync-clusters").await
    }

    /// List the cluster-type catalog.
    ///
    /// `GET /api/cluster-types`
    pub async fn list_cluster_types(&self) -> Result<Vec<ClusterTypeRecord>, Error> {
        debug!("listing cluster types");
        self.get("cluster-types").await
    }

    /// Create a cluster under an environment.
    ///
    /// `POST /api/environments/{env_id}/clusters`
    pub async fn create_cluster(&self, cluster: &NewCluster) -> Result<(), Error> {
        debug!(env_id = cluster.env_id, name = %cluster.name, "creating cluster");
        self.post_no_response(&format!("environments/{}/clusters", cluster.env_id), cluster)
            .await
    }

    /// Attach a sync cluster to an existing cluster.
    ///
    /// `POST /api/clusters/{cluster_id}/sync-clusters`
    pub async fn create_sync_cluster(
        &self,
        cluster_id: u64,
        sync: &NewSyncCluster,
    ) -> Result<(), Error> {
        debug!(cluster_id, name = %sync.name, "creating sync cluster");
        self.post_no_response(&format!("clusters/{cluster_id}/sync-clusters"), sync)
            .await
    }
}
