// ── Immutable topology snapshot ──
//
// One committed batch: the aggregated hierarchy plus both type catalogs.
// Snapshots are shared behind `Arc` and never mutated after commit.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::aggregate::Aggregation;
use crate::model::{
    Cluster, ClusterId, ClusterType, ClusterTypeId, Environment, EnvironmentId, EnvironmentType,
    EnvironmentTypeId, Site, SiteId,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopologySnapshot {
    /// Reload ticket that produced this snapshot. 0 means never loaded.
    pub generation: u64,
    pub local_site: Option<Site>,
    pub remote_sites: IndexMap<SiteId, Site>,
    pub environment_types: Vec<EnvironmentType>,
    pub cluster_types: Vec<ClusterType>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl TopologySnapshot {
    pub(crate) fn from_parts(
        generation: u64,
        aggregation: Aggregation,
        environment_types: Vec<EnvironmentType>,
        cluster_types: Vec<ClusterType>,
        refreshed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            generation,
            local_site: aggregation.local,
            remote_sites: aggregation
                .remote
                .into_iter()
                .map(|site| (site.id, site))
                .collect(),
            environment_types,
            cluster_types,
            refreshed_at: Some(refreshed_at),
        }
    }

    // ── Site queries ─────────────────────────────────────────────────

    /// Local site first, then remote sites in server order.
    pub fn all_sites(&self) -> Vec<&Site> {
        self.local_site
            .iter()
            .chain(self.remote_sites.values())
            .collect()
    }

    /// The local site as a zero-or-one element list.
    pub fn local_sites(&self) -> Vec<&Site> {
        self.local_site.iter().collect()
    }

    pub fn site(&self, id: SiteId) -> Option<&Site> {
        self.local_site
            .as_ref()
            .filter(|s| s.id == id)
            .or_else(|| self.remote_sites.get(&id))
    }

    // ── Child queries ────────────────────────────────────────────────

    /// Environments of a site in insertion order; empty for unknown ids.
    pub fn environments_for_site(&self, id: SiteId) -> Vec<&Environment> {
        self.site(id)
            .map(|s| s.environments.values().collect())
            .unwrap_or_default()
    }

    /// Locate an environment, scanning the local site before remote ones.
    pub fn environment(&self, id: EnvironmentId) -> Option<&Environment> {
        self.all_sites()
            .into_iter()
            .find_map(|site| site.environments.get(&id))
    }

    /// Clusters of an environment in insertion order; empty for unknown ids.
    pub fn clusters_for_environment(&self, id: EnvironmentId) -> Vec<&Cluster> {
        self.environment(id)
            .map(|e| e.clusters.values().collect())
            .unwrap_or_default()
    }

    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.all_sites()
            .into_iter()
            .flat_map(|site| site.environments.values())
            .find_map(|env| env.clusters.get(&id))
    }

    // ── Catalog lookups ──────────────────────────────────────────────

    pub fn environment_type_name(&self, id: EnvironmentTypeId) -> Option<&str> {
        self.environment_types
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.as_str())
    }

    pub fn cluster_type_name(&self, id: ClusterTypeId) -> Option<&str> {
        self.cluster_types
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.as_str())
    }

    // ── Summary ──────────────────────────────────────────────────────

    /// True once at least one site has been loaded.
    pub fn is_hydrated(&self) -> bool {
        self.local_site.is_some() || !self.remote_sites.is_empty()
    }

    pub fn site_count(&self) -> usize {
        usize::from(self.local_site.is_some()) + self.remote_sites.len()
    }

    pub fn environment_count(&self) -> usize {
        self.all_sites()
            .iter()
            .map(|s| s.environments.len())
            .sum()
    }

    pub fn cluster_count(&self) -> usize {
        self.all_sites().iter().map(|s| s.cluster_count()).sum()
    }

    pub fn sync_cluster_count(&self) -> usize {
        self.local_site.as_ref().map_or(0, |site| {
            site.environments
                .values()
                .flat_map(|e| e.clusters.values())
                .map(|c| c.sync_clusters.len())
                .sum()
        })
    }
}
