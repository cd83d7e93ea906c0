// ── API-to-domain type conversions ──
//
// Bridges flat `topo_api` wire records into canonical `topo_core::model`
// types. Children are left empty; the aggregation pass fills them in.

use indexmap::IndexMap;
use topo_api::{
    ClusterRecord, ClusterTypeRecord, EnvironmentRecord, EnvironmentTypeRecord, SiteRecord,
    SyncClusterRecord,
};

use crate::model::{
    Cluster, ClusterId, ClusterType, ClusterTypeId, Environment, EnvironmentId, EnvironmentType,
    EnvironmentTypeId, Locality, Site, SiteId, SyncCluster, SyncClusterId,
};

impl Site {
    /// Build an empty site from its record with an explicit locality.
    ///
    /// Locality is decided by the caller because a local-flagged record
    /// can be demoted when more than one claims to be local.
    pub(crate) fn from_record(record: &SiteRecord, locality: Locality) -> Self {
        Self::new(SiteId::new(record.id), record.name.clone(), locality)
    }
}

impl From<&EnvironmentRecord> for Environment {
    fn from(r: &EnvironmentRecord) -> Self {
        Self {
            id: EnvironmentId::new(r.id),
            name: r.name.clone(),
            site_id: SiteId::new(r.site_id),
            environment_type_id: EnvironmentTypeId::new(r.environment_type_id),
            clusters: IndexMap::new(),
        }
    }
}

impl From<&ClusterRecord> for Cluster {
    fn from(r: &ClusterRecord) -> Self {
        Self {
            id: ClusterId::new(r.id),
            name: r.name.clone(),
            env_id: EnvironmentId::new(r.env_id),
            cluster_type_id: ClusterTypeId::new(r.cluster_type_id),
            sync_clusters: IndexMap::new(),
        }
    }
}

impl From<&SyncClusterRecord> for SyncCluster {
    fn from(r: &SyncClusterRecord) -> Self {
        Self {
            id: SyncClusterId::new(r.id),
            name: r.name.clone(),
            cluster_id: ClusterId::new(r.send_id),
        }
    }
}

impl From<EnvironmentTypeRecord> for EnvironmentType {
    fn from(r: EnvironmentTypeRecord) -> Self {
        Self {
            id: EnvironmentTypeId::new(r.id),
            name: r.name,
        }
    }
}

impl From<ClusterTypeRecord> for ClusterType {
    fn from(r: ClusterTypeRecord) -> Self {
        Self {
            id: ClusterTypeId::new(r.id),
            name: r.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_cluster_send_id_becomes_cluster_id() {
        let record = SyncClusterRecord {
            id: 1000,
            name: "sync1".into(),
            send_id: 100,
        };
        let sync = SyncCluster::from(&record);
        assert_eq!(sync.cluster_id, ClusterId::new(100));
        assert_eq!(sync.id, SyncClusterId::new(1000));
    }

    #[test]
    fn environment_starts_without_clusters() {
        let record = EnvironmentRecord {
            id: 10,
            name: "prod".into(),
            site_id: 1,
            environment_type_id: 2,
        };
        let env = Environment::from(&record);
        assert_eq!(env.site_id, SiteId::new(1));
        assert!(env.clusters.is_empty());
    }
}
