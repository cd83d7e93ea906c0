//! Sync-cluster command handlers.

use tabled::Tabled;
use topo_core::{Controller, SyncCluster, TopologySnapshot};

use crate::cli::{GlobalOpts, SyncClustersArgs, SyncClustersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SyncClusterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cluster")]
    cluster: String,
}

impl SyncClusterRow {
    fn new(snap: &TopologySnapshot, s: &SyncCluster) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            cluster: snap
                .cluster(s.cluster_id)
                .map_or_else(|| s.cluster_id.to_string(), |c| format!("{} ({})", c.name, c.id)),
        }
    }
}

/// Every sync-cluster hanging off the local site, in hierarchy order.
fn local_sync_clusters(snap: &TopologySnapshot) -> Vec<&SyncCluster> {
    snap.local_site
        .iter()
        .flat_map(|site| site.environments.values())
        .flat_map(|env| env.clusters.values())
        .flat_map(|cluster| cluster.sync_clusters.values())
        .collect()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: SyncClustersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SyncClustersCommand::List { cluster } => {
            let snap = controller.snapshot();
            let syncs: Vec<&SyncCluster> = match cluster {
                Some(id) => util::require_local_cluster(&snap, id)?
                    .sync_clusters
                    .values()
                    .collect(),
                None => local_sync_clusters(&snap),
            };
            let out = output::render_list(
                &global.output,
                &syncs,
                |s| SyncClusterRow::new(&snap, s),
                |s| s.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SyncClustersCommand::Create { cluster, name } => {
            let snap = controller.snapshot();
            let cluster_name = util::require_local_cluster(&snap, cluster)?.name.clone();

            controller
                .create_sync_cluster(cluster, name.as_str())
                .await?;
            if !global.quiet {
                eprintln!("Sync-cluster '{}' created for cluster '{cluster_name}'", name.trim());
            }
            Ok(())
        }
    }
}
