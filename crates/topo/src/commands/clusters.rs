//! Cluster command handlers.

use tabled::Tabled;
use topo_core::{Cluster, Controller, TopologySnapshot};

use crate::cli::{ClustersArgs, ClustersCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ClusterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Environment")]
    environment: String,
    #[tabled(rename = "Type")]
    cluster_type: String,
    #[tabled(rename = "Sync")]
    sync_clusters: usize,
}

impl ClusterRow {
    fn new(snap: &TopologySnapshot, c: &Cluster) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            environment: util::environment_name(snap, c.env_id),
            cluster_type: util::cluster_type_label(snap, c.cluster_type_id),
            sync_clusters: c.sync_clusters.len(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: ClustersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ClustersCommand::List { environment } => {
            let snap = controller.snapshot();
            let clusters: Vec<&Cluster> = match environment {
                Some(id) => {
                    util::require_environment(&snap, id)?;
                    snap.clusters_for_environment(id)
                }
                None => snap
                    .all_sites()
                    .into_iter()
                    .flat_map(|s| s.environments.values())
                    .flat_map(|e| e.clusters.values())
                    .collect(),
            };
            let out = output::render_list(
                &global.output,
                &clusters,
                |c| ClusterRow::new(&snap, c),
                |c| c.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ClustersCommand::Create {
            environment,
            cluster_type,
            name,
        } => {
            let snap = controller.snapshot();
            let env_name = util::require_environment(&snap, environment)?.name.clone();
            util::require_cluster_type(&snap, cluster_type)?;

            controller
                .create_cluster(environment, name.as_str(), cluster_type)
                .await?;
            if !global.quiet {
                eprintln!("Cluster '{}' created in environment '{env_name}'", name.trim());
            }
            Ok(())
        }
    }
}
