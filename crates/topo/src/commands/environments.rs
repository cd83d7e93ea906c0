//! Environment command handlers.

use tabled::Tabled;
use topo_core::{Controller, Environment, TopologySnapshot};

use crate::cli::{EnvironmentsArgs, EnvironmentsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EnvironmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Type")]
    environment_type: String,
    #[tabled(rename = "Clusters")]
    clusters: usize,
}

impl EnvironmentRow {
    fn new(snap: &TopologySnapshot, e: &Environment) -> Self {
        Self {
            id: e.id.to_string(),
            name: e.name.clone(),
            site: util::site_name(snap, e.site_id),
            environment_type: util::environment_type_label(snap, e.environment_type_id),
            clusters: e.clusters.len(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: EnvironmentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        EnvironmentsCommand::List { site } => {
            let snap = controller.snapshot();
            let envs: Vec<&Environment> = match site {
                Some(id) => {
                    util::require_site(&snap, id)?;
                    snap.environments_for_site(id)
                }
                None => snap
                    .all_sites()
                    .into_iter()
                    .flat_map(|s| s.environments.values())
                    .collect(),
            };
            let out = output::render_list(
                &global.output,
                &envs,
                |e| EnvironmentRow::new(&snap, e),
                |e| e.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EnvironmentsCommand::Create {
            site,
            environment_type,
            name,
        } => {
            let snap = controller.snapshot();
            let site_name = util::require_site(&snap, site)?.name.clone();
            util::require_environment_type(&snap, environment_type)?;

            controller
                .create_environment(site, name.as_str(), environment_type)
                .await?;
            if !global.quiet {
                eprintln!("Environment '{}' created on site '{site_name}'", name.trim());
            }
            Ok(())
        }
    }
}
