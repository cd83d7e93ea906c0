// ── Topology hierarchy ──
//
// Site → Environment → Cluster, with SyncCluster leaves hanging off the
// clusters of the local site. Children live in `IndexMap`s keyed by id so
// lookups are O(1) while iteration stays in server order.

use indexmap::IndexMap;
use serde::Serialize;
use strum::{Display, EnumString};

use super::ids::{ClusterId, ClusterTypeId, EnvironmentId, EnvironmentTypeId, SiteId, SyncClusterId};

/// Whether a site is the one this deployment runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locality {
    Local,
    Remote,
}

impl Locality {
    /// Interpret the wire `physical_location` flag. Only `Y` means local.
    pub fn from_flag(flag: &str) -> Self {
        if flag.trim().eq_ignore_ascii_case("y") {
            Self::Local
        } else {
            Self::Remote
        }
    }
}

// ── Site ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    pub locality: Locality,
    pub environments: IndexMap<EnvironmentId, Environment>,
}

impl Site {
    pub fn new(id: SiteId, name: impl Into<String>, locality: Locality) -> Self {
        Self {
            id,
            name: name.into(),
            locality,
            environments: IndexMap::new(),
        }
    }

    pub fn is_local(&self) -> bool {
        self.locality == Locality::Local
    }

    pub fn environment(&self, id: EnvironmentId) -> Option<&Environment> {
        self.environments.get(&id)
    }

    /// Total clusters across every environment of this site.
    pub fn cluster_count(&self) -> usize {
        self.environments.values().map(|e| e.clusters.len()).sum()
    }
}

// ── Environment ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Environment {
    pub id: EnvironmentId,
    pub name: String,
    pub site_id: SiteId,
    pub environment_type_id: EnvironmentTypeId,
    pub clusters: IndexMap<ClusterId, Cluster>,
}

impl Environment {
    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(&id)
    }
}

// ── Cluster ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    pub id: ClusterId,
    pub name: String,
    pub env_id: EnvironmentId,
    pub cluster_type_id: ClusterTypeId,
    /// Replicas of this cluster. Always empty for clusters of remote sites.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub sync_clusters: IndexMap<SyncClusterId, SyncCluster>,
}

// ── SyncCluster ──────────────────────────────────────────────────────

/// A replication relationship targeting `cluster_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncCluster {
    pub id: SyncClusterId,
    pub name: String,
    pub cluster_id: ClusterId,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn locality_flag_parsing() {
        assert_eq!(Locality::from_flag("Y"), Locality::Local);
        assert_eq!(Locality::from_flag(" y "), Locality::Local);
        assert_eq!(Locality::from_flag("N"), Locality::Remote);
        assert_eq!(Locality::from_flag(""), Locality::Remote);
        assert_eq!(Locality::from_flag("yes"), Locality::Remote);
    }

    #[test]
    fn locality_display_and_parse() {
        assert_eq!(Locality::Local.to_string(), "local");
        assert_eq!("REMOTE".parse::<Locality>().unwrap(), Locality::Remote);
    }

    #[test]
    fn remote_cluster_omits_empty_sync_map() {
        let cluster = Cluster {
            id: ClusterId::new(1),
            name: "c".into(),
            env_id: EnvironmentId::new(2),
            cluster_type_id: ClusterTypeId::new(3),
            sync_clusters: IndexMap::new(),
        };
        let json = serde_json::to_value(&cluster).unwrap();
        assert!(json.get("sync_clusters").is_none());
    }
}
