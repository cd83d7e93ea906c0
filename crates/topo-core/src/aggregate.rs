// ── Topology aggregation ──
//
// Turns the four flat record collections into the Site → Environment →
// Cluster hierarchy. The local site additionally gets sync-cluster
// metadata attached to its clusters. Pure functions: identical inputs
// always yield structurally equal output.

use std::collections::HashMap;

use indexmap::IndexMap;
use topo_api::{ClusterRecord, EnvironmentRecord, SiteRecord, SyncClusterRecord};
use tracing::{debug, trace};

use crate::model::{Cluster, ClusterId, Environment, EnvironmentId, Locality, Site, SyncCluster};

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub local: Option<Site>,
    pub remote: Vec<Site>,
}

/// Split raw sites into the local site and the remote ones.
///
/// The first local-flagged record wins; any later local-flagged record is
/// demoted to remote. Remote order follows input order.
pub fn partition_sites(sites: &[SiteRecord]) -> (Option<&SiteRecord>, Vec<&SiteRecord>) {
    let mut local: Option<&SiteRecord> = None;
    let mut remote = Vec::with_capacity(sites.len());

    for site in sites {
        if site.is_local() {
            if let Some(first) = local {
                debug!(
                    site_id = site.id,
                    local_site_id = first.id,
                    "duplicate local site flag; treating as remote"
                );
                remote.push(site);
            } else {
                local = Some(site);
            }
        } else {
            remote.push(site);
        }
    }

    (local, remote)
}

/// Build the local site with its environments, clusters and sync-clusters.
pub fn build_local_site(
    site: &SiteRecord,
    envs: &[EnvironmentRecord],
    clusters: &[ClusterRecord],
    sync_clusters: &[SyncClusterRecord],
) -> Site {
    let mut built = Site::from_record(site, Locality::Local);

    for env in envs.iter().filter(|e| e.site_id == site.id) {
        let env = Environment::from(env);
        built.environments.insert(env.id, env);
    }

    for cluster in clusters {
        if let Some(env) = built
            .environments
            .get_mut(&EnvironmentId::new(cluster.env_id))
        {
            let cluster = Cluster::from(cluster);
            env.clusters.insert(cluster.id, cluster);
        }
    }

    for record in sync_clusters {
        let sync = SyncCluster::from(record);
        match find_cluster_mut(&mut built.environments, sync.cluster_id) {
            Some(cluster) => {
                cluster.sync_clusters.insert(sync.id, sync);
            }
            None => trace!(
                sync_cluster_id = record.id,
                send_id = record.send_id,
                "sync-cluster target not in local site; dropped"
            ),
        }
    }

    built
}

/// First cluster with `id` in environment iteration order.
fn find_cluster_mut(
    environments: &mut IndexMap<EnvironmentId, Environment>,
    id: ClusterId,
) -> Option<&mut Cluster> {
    environments
        .values_mut()
        .find_map(|env| env.clusters.get_mut(&id))
}

/// Build every remote site with its environments and clusters.
///
/// Environments and clusters are pre-indexed by parent id so the whole
/// pass is linear in the number of records.
pub fn build_remote_sites(
    sites: &[&SiteRecord],
    envs: &[EnvironmentRecord],
    clusters: &[ClusterRecord],
) -> Vec<Site> {
    let mut envs_by_site: HashMap<u64, Vec<&EnvironmentRecord>> = HashMap::new();
    for env in envs {
        envs_by_site.entry(env.site_id).or_default().push(env);
    }

    let mut clusters_by_env: HashMap<u64, Vec<&ClusterRecord>> = HashMap::new();
    for cluster in clusters {
        clusters_by_env
            .entry(cluster.env_id)
            .or_default()
            .push(cluster);
    }

    sites
        .iter()
        .map(|site| {
            let mut built = Site::from_record(site, Locality::Remote);
            for env in envs_by_site.get(&site.id).into_iter().flatten() {
                let mut environment = Environment::from(*env);
                for cluster in clusters_by_env.get(&env.id).into_iter().flatten() {
                    let cluster = Cluster::from(*cluster);
                    environment.clusters.insert(cluster.id, cluster);
                }
                built.environments.insert(environment.id, environment);
            }
            built
        })
        .collect()
}

/// Full aggregation pass over one batch of fetched records.
pub fn aggregate(
    sites: &[SiteRecord],
    envs: &[EnvironmentRecord],
    clusters: &[ClusterRecord],
    sync_clusters: &[SyncClusterRecord],
) -> Aggregation {
    let (local, remote) = partition_sites(sites);
    let local = local.map(|site| build_local_site(site, envs, clusters, sync_clusters));
    let remote = build_remote_sites(&remote, envs, clusters);

    debug!(
        local = local.is_some(),
        remote = remote.len(),
        "topology aggregated"
    );

    Aggregation { local, remote }
}
