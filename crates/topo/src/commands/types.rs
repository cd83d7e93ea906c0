//! Type catalog handlers.

use serde::Serialize;
use tabled::Tabled;
use topo_core::{ClusterType, Controller, EnvironmentType};

use crate::cli::{GlobalOpts, TypesArgs, TypesCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

fn print_catalog<T: Serialize>(
    global: &GlobalOpts,
    entries: &[T],
    fields: impl Fn(&T) -> (String, String),
) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        entries,
        |t| {
            let (id, name) = fields(t);
            TypeRow { id, name }
        },
        |t| fields(t).0,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn handle(controller: &Controller, args: TypesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let snap = controller.snapshot();
    match args.command {
        TypesCommand::Environments => {
            print_catalog(global, &snap.environment_types, |t: &EnvironmentType| {
                (t.id.to_string(), t.name.clone())
            })
        }
        TypesCommand::Clusters => print_catalog(global, &snap.cluster_types, |t: &ClusterType| {
            (t.id.to_string(), t.name.clone())
        }),
    }
}
