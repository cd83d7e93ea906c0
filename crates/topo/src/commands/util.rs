//! Shared helpers for command handlers.

use topo_core::{
    Cluster, ClusterId, ClusterTypeId, Environment, EnvironmentId, EnvironmentTypeId, Site,
    SiteId, TopologySnapshot,
};

use crate::error::CliError;

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt(e.to_string())
}

fn not_found(resource_type: &str, identifier: impl ToString, list_command: &str) -> CliError {
    CliError::NotFound {
        resource_type: resource_type.into(),
        identifier: identifier.to_string(),
        list_command: list_command.into(),
    }
}

// ── Snapshot lookups ────────────────────────────────────────────────

pub fn require_site(snap: &TopologySnapshot, id: SiteId) -> Result<&Site, CliError> {
    snap.site(id)
        .ok_or_else(|| not_found("site", id, "sites list"))
}

pub fn require_environment(
    snap: &TopologySnapshot,
    id: EnvironmentId,
) -> Result<&Environment, CliError> {
    snap.environment(id)
        .ok_or_else(|| not_found("environment", id, "environments list"))
}

pub fn require_cluster(snap: &TopologySnapshot, id: ClusterId) -> Result<&Cluster, CliError> {
    snap.cluster(id)
        .ok_or_else(|| not_found("cluster", id, "clusters list"))
}

/// A cluster that can carry sync-clusters: it must live on the local site.
pub fn require_local_cluster(
    snap: &TopologySnapshot,
    id: ClusterId,
) -> Result<&Cluster, CliError> {
    let local = snap
        .local_site
        .as_ref()
        .and_then(|site| site.environments.values().find_map(|env| env.cluster(id)));
    match local {
        Some(cluster) => Ok(cluster),
        None => {
            require_cluster(snap, id)?;
            Err(CliError::Validation {
                field: "cluster".into(),
                reason: format!("cluster {id} is not on the local site; only local clusters can be synced"),
            })
        }
    }
}

pub fn require_environment_type(
    snap: &TopologySnapshot,
    id: EnvironmentTypeId,
) -> Result<(), CliError> {
    snap.environment_type_name(id)
        .map(|_| ())
        .ok_or_else(|| not_found("environment type", id, "types environments"))
}

pub fn require_cluster_type(snap: &TopologySnapshot, id: ClusterTypeId) -> Result<(), CliError> {
    snap.cluster_type_name(id)
        .map(|_| ())
        .ok_or_else(|| not_found("cluster type", id, "types clusters"))
}

// ── Display helpers ─────────────────────────────────────────────────

pub fn site_name(snap: &TopologySnapshot, id: SiteId) -> String {
    snap.site(id).map_or_else(|| id.to_string(), |s| s.name.clone())
}

pub fn environment_name(snap: &TopologySnapshot, id: EnvironmentId) -> String {
    snap.environment(id)
        .map_or_else(|| id.to_string(), |e| e.name.clone())
}

pub fn environment_type_label(snap: &TopologySnapshot, id: EnvironmentTypeId) -> String {
    snap.environment_type_name(id)
        .map_or_else(|| format!("#{id}"), str::to_owned)
}

pub fn cluster_type_label(snap: &TopologySnapshot, id: ClusterTypeId) -> String {
    snap.cluster_type_name(id)
        .map_or_else(|| format!("#{id}"), str::to_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use topo_core::Locality;

    fn site_with_cluster(id: u64, locality: Locality, cluster: u64) -> Site {
        let env_id = EnvironmentId::new(id * 10);
        let mut env = Environment {
            id: env_id,
            name: format!("env-{id}"),
            site_id: SiteId::new(id),
            environment_type_id: EnvironmentTypeId::new(1),
            clusters: Default::default(),
        };
        env.clusters.insert(
            ClusterId::new(cluster),
            Cluster {
                id: ClusterId::new(cluster),
                name: format!("c{cluster}"),
                env_id,
                cluster_type_id: ClusterTypeId::new(1),
                sync_clusters: Default::default(),
            },
        );
        let mut site = Site::new(SiteId::new(id), format!("site-{id}"), locality);
        site.environments.insert(env_id, env);
        site
    }

    fn snapshot() -> TopologySnapshot {
        let remote = site_with_cluster(2, Locality::Remote, 200);
        TopologySnapshot {
            local_site: Some(site_with_cluster(1, Locality::Local, 100)),
            remote_sites: std::iter::once((remote.id, remote)).collect(),
            ..TopologySnapshot::default()
        }
    }

    #[test]
    fn local_cluster_accepted() {
        let snap = snapshot();
        assert_eq!(require_local_cluster(&snap, ClusterId::new(100)).unwrap().name, "c100");
    }

    #[test]
    fn remote_cluster_rejected_as_validation() {
        let snap = snapshot();
        let err = require_local_cluster(&snap, ClusterId::new(200)).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }), "{err:?}");
    }

    #[test]
    fn unknown_cluster_is_not_found() {
        let snap = snapshot();
        let err = require_local_cluster(&snap, ClusterId::new(999)).unwrap_err();
        assert!(matches!(err, CliError::NotFound { .. }), "{err:?}");
    }

    #[test]
    fn unknown_type_falls_back_to_id_label() {
        let snap = snapshot();
        assert_eq!(environment_type_label(&snap, EnvironmentTypeId::new(3)), "#3");
        assert!(require_cluster_type(&snap, ClusterTypeId::new(3)).is_err());
    }
}
