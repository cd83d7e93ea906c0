// Topology API wire types
//
// Flat records exactly as the server returns them: one collection per
// entity kind, parents referenced by foreign-key id. Field names are
// snake_case on the wire; camelCase aliases are accepted because some
// deployments proxy the API through a JSON-casing gateway.

use serde::{Deserialize, Serialize};

// ── Sites ────────────────────────────────────────────────────────────

/// Site record from `GET /api/sites`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub id: u64,
    pub name: String,
    /// `"Y"` for the site this instance runs in, `"N"` for remote sites.
    #[serde(alias = "physicalLocation", default)]
    pub physical_location: String,
}

impl SiteRecord {
    /// Whether the record is flagged as the local site.
    pub fn is_local(&self) -> bool {
        self.physical_location.trim().eq_ignore_ascii_case("y")
    }
}

// ── Environments ─────────────────────────────────────────────────────

/// Environment record from `GET /api/environments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentRecord {
    pub id: u64,
    pub name: String,
    #[serde(alias = "siteId")]
    pub site_id: u64,
    #[serde(alias = "environmentTypeId")]
    pub environment_type_id: u64,
}

// ── Clusters ─────────────────────────────────────────────────────────

/// Cluster record from `GET /api/clusters`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRecord {
    pub id: u64,
    pub name: String,
    #[serde(alias = "envId")]
    pub env_id: u64,
    #[serde(alias = "clusterTypeId")]
    pub cluster_type_id: u64,
}

/// Sync-cluster record from `GET /api/sync-clusters`.
///
/// `send_id` is the id of the cluster being replicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncClusterRecord {
    pub id: u64,
    pub name: String,
    #[serde(alias = "sendId")]
    pub send_id: u64,
}

// ── Catalogs ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentTypeRecord {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterTypeRecord {
    pub id: u64,
    pub name: String,
}

// ── Create payloads ──────────────────────────────────────────────────

/// Body for `POST /api/sites`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSite {
    pub name: String,
    pub physical_location: String,
}

impl NewSite {
    /// Sites created through the API are always remote.
    pub fn remote(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            physical_location: "N".into(),
        }
    }
}

/// Body for `POST /api/sites/{site_id}/environments`.
#[derive(Debug, Clone, Serialize)]
pub struct NewEnvironment {
    pub name: String,
    pub environment_type_id: u64,
    pub site_id: u64,
}

/// Body for `POST /api/environments/{env_id}/clusters`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCluster {
    pub name: String,
    pub cluster_type_id: u64,
    pub env_id: u64,
}

/// Body for `POST /api/clusters/{cluster_id}/sync-clusters`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSyncCluster {
    pub name: String,
}
