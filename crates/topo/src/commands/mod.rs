//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod add;
pub mod clusters;
pub mod config_cmd;
pub mod environments;
pub mod sites;
pub mod sync_clusters;
pub mod types;
pub mod util;
pub mod watch;

use topo_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
///
/// Every command except `watch` works on one freshly loaded snapshot.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if matches!(cmd, Command::Watch(_)) {
        return watch::handle(controller, global).await;
    }

    controller.reload().await?;

    match cmd {
        Command::Sites(args) => sites::handle(controller, args, global).await,
        Command::Environments(args) => environments::handle(controller, args, global).await,
        Command::Clusters(args) => clusters::handle(controller, args, global).await,
        Command::SyncClusters(args) => sync_clusters::handle(controller, args, global).await,
        Command::Types(args) => types::handle(controller, args, global),
        Command::Add(args) => add::handle(controller, args, global).await,
        // Watch, Config and Completions are handled before this match
        Command::Watch(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
