// ── Typed request structs for Command payloads ──

use serde::{Deserialize, Serialize};

use crate::model::{ClusterId, ClusterTypeId, EnvironmentId, EnvironmentTypeId, SiteId};

/// New remote site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSiteRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEnvironmentRequest {
    pub site_id: SiteId,
    pub name: String,
    pub environment_type_id: EnvironmentTypeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateClusterRequest {
    pub env_id: EnvironmentId,
    pub name: String,
    pub cluster_type_id: ClusterTypeId,
}

/// New sync-cluster replicating `cluster_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSyncClusterRequest {
    pub cluster_id: ClusterId,
    pub name: String,
}
