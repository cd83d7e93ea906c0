//! Long-running refresh loop: prints a summary each time a reload commits.

use chrono::{DateTime, Utc};
use serde::Serialize;
use topo_core::{Controller, ControllerConfig, TopologySnapshot};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::error::CliError;
use crate::output;

/// Reload period used when neither the flag nor the profile sets one.
const DEFAULT_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct Summary {
    generation: u64,
    refreshed_at: Option<DateTime<Utc>>,
    sites: usize,
    environments: usize,
    clusters: usize,
    sync_clusters: usize,
}

impl From<&TopologySnapshot> for Summary {
    fn from(snap: &TopologySnapshot) -> Self {
        Self {
            generation: snap.generation,
            refreshed_at: snap.refreshed_at,
            sites: snap.site_count(),
            environments: snap.environment_count(),
            clusters: snap.cluster_count(),
            sync_clusters: snap.sync_cluster_count(),
        }
    }
}

fn line(s: &Summary) -> String {
    let at = s
        .refreshed_at
        .map_or_else(|| "--:--:--".into(), |t| t.format("%H:%M:%S").to_string());
    format!(
        "[{at}] generation {}: {} sites, {} environments, {} clusters, {} sync-clusters",
        s.generation, s.sites, s.environments, s.clusters, s.sync_clusters
    )
}

fn print(snap: &TopologySnapshot, global: &GlobalOpts) -> Result<(), CliError> {
    let summary = Summary::from(snap);
    let out = output::render_single(&global.output, &summary, line, |s| s.generation.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Apply `--interval`, falling back to the profile, then the default.
pub fn apply_interval(args: &WatchArgs, config: &mut ControllerConfig) {
    config.refresh_interval_secs = args.interval.unwrap_or(match config.refresh_interval_secs {
        0 => DEFAULT_INTERVAL_SECS,
        secs => secs,
    });
}

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    controller.start().await?;
    let mut stream = controller.subscribe();
    print(stream.current(), global)?;

    loop {
        tokio::select! {
            next = stream.changed() => match next {
                Some(snap) => print(&snap, global)?,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    controller.shutdown().await;
    Ok(())
}
