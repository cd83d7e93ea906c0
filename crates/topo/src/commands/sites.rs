//! Site command handlers.

use std::fmt::Write as _;

use tabled::Tabled;
use topo_core::{Controller, Site, TopologySnapshot};

use crate::cli::{GlobalOpts, SitesArgs, SitesCommand};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Locality")]
    locality: String,
    #[tabled(rename = "Environments")]
    environments: usize,
    #[tabled(rename = "Clusters")]
    clusters: usize,
}

impl From<&&Site> for SiteRow {
    fn from(s: &&Site) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            locality: s.locality.to_string(),
            environments: s.environments.len(),
            clusters: s.cluster_count(),
        }
    }
}

// ── Tree view ───────────────────────────────────────────────────────

/// Indented Site → Environment → Cluster → SyncCluster outline.
fn tree(snap: &TopologySnapshot, sites: &[&Site], paint: Painter) -> String {
    let mut out = String::new();
    for site in sites {
        let label = format!("{} ({})", site.name, site.id);
        let label = if site.is_local() {
            format!("{} {}", paint.local(&label), paint.dim("[local]"))
        } else {
            paint.heading(&label)
        };
        let _ = writeln!(out, "{label}");

        let env_count = site.environments.len();
        for (i, env) in site.environments.values().enumerate() {
            let last_env = i + 1 == env_count;
            let (branch, stem) = if last_env { ("└─", "   ") } else { ("├─", "│  ") };
            let _ = writeln!(
                out,
                "{branch} {} {}",
                paint.accent(&format!("{} ({})", env.name, env.id)),
                paint.dim(&format!(
                    "[{}]",
                    util::environment_type_label(snap, env.environment_type_id)
                )),
            );

            let cluster_count = env.clusters.len();
            for (j, cluster) in env.clusters.values().enumerate() {
                let last_cluster = j + 1 == cluster_count;
                let (cbranch, cstem) = if last_cluster { ("└─", "   ") } else { ("├─", "│  ") };
                let _ = writeln!(
                    out,
                    "{stem}{cbranch} {} ({}) {}",
                    cluster.name,
                    cluster.id,
                    paint.dim(&format!(
                        "[{}]",
                        util::cluster_type_label(snap, cluster.cluster_type_id)
                    )),
                );
                for sync in cluster.sync_clusters.values() {
                    let _ = writeln!(
                        out,
                        "{stem}{cstem}  ⇄ {}",
                        paint.dim(&format!("{} ({})", sync.name, sync.id)),
                    );
                }
            }
        }
    }
    out.trim_end().to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: SitesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SitesCommand::List => {
            let snap = controller.snapshot();
            let sites = snap.all_sites();
            let out = output::render_list(
                &global.output,
                &sites,
                |s| SiteRow::from(s),
                |s| s.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SitesCommand::Tree { site } => {
            let snap = controller.snapshot();
            let sites = match site {
                Some(id) => vec![util::require_site(&snap, id)?],
                None => snap.all_sites(),
            };
            let paint = Painter::new(&global.color);
            let out = output::render_single(
                &global.output,
                &sites,
                |s| tree(&snap, s, paint),
                |s| {
                    s.iter()
                        .map(|site| site.id.to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SitesCommand::Create { name } => {
            controller.create_site(name.as_str()).await?;
            if !global.quiet {
                eprintln!("Site '{}' created", name.trim());
            }
            Ok(())
        }
    }
}
