//! Clap derive structures for the `topo` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Args, Parser, Subcommand, ValueEnum};

use topo_core::{ClusterId, ClusterTypeId, EnvironmentId, EnvironmentTypeId, FormMode, SiteId};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// topo -- browse and grow a site / environment / cluster topology
#[derive(Debug, Parser)]
#[command(
    name = "topo",
    version,
    about = "Browse and extend a site / environment / cluster topology",
    long_about = "Command-line client for a topology server.\n\n\
        Sites own environments, environments own clusters, and clusters of the\n\
        local site may be replicated by sync-clusters.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "TOPO_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Topology server URL (overrides profile)
    #[arg(long, short = 's', env = "TOPO_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TOPO_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "TOPO_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "TOPO_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, inspect and create sites
    Sites(SitesArgs),

    /// List and create environments
    #[command(alias = "env", alias = "envs")]
    Environments(EnvironmentsArgs),

    /// List and create clusters
    #[command(alias = "cl")]
    Clusters(ClustersArgs),

    /// List and create sync-clusters on the local site
    #[command(alias = "sync")]
    SyncClusters(SyncClustersArgs),

    /// Show environment and cluster type catalogs
    Types(TypesArgs),

    /// Create an entity through the interactive cascading form
    Add(AddArgs),

    /// Reload periodically and print a summary on every change
    Watch(WatchArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SITES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[command(subcommand)]
    pub command: SitesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    /// List sites (local site first)
    #[command(alias = "ls")]
    List,

    /// Show the full hierarchy, optionally for a single site
    Tree {
        /// Site ID
        site: Option<SiteId>,
    },

    /// Create a remote site
    Create {
        /// Site name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ENVIRONMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EnvironmentsArgs {
    #[command(subcommand)]
    pub command: EnvironmentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum EnvironmentsCommand {
    /// List environments, optionally of a single site
    #[command(alias = "ls")]
    List {
        /// Only environments of this site
        #[arg(long)]
        site: Option<SiteId>,
    },

    /// Create an environment under a site
    Create {
        /// Parent site ID
        #[arg(long, required = true)]
        site: SiteId,

        /// Environment type ID (see `topo types environments`)
        #[arg(long = "type", value_name = "TYPE_ID", required = true)]
        environment_type: EnvironmentTypeId,

        /// Environment name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CLUSTERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ClustersArgs {
    #[command(subcommand)]
    pub command: ClustersCommand,
}

#[derive(Debug, Subcommand)]
pub enum ClustersCommand {
    /// List clusters, optionally of a single environment
    #[command(alias = "ls")]
    List {
        /// Only clusters of this environment
        #[arg(long, short = 'e')]
        environment: Option<EnvironmentId>,
    },

    /// Create a cluster under an environment
    Create {
        /// Parent environment ID
        #[arg(long, short = 'e', required = true)]
        environment: EnvironmentId,

        /// Cluster type ID (see `topo types clusters`)
        #[arg(long = "type", value_name = "TYPE_ID", required = true)]
        cluster_type: ClusterTypeId,

        /// Cluster name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SYNC-CLUSTERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SyncClustersArgs {
    #[command(subcommand)]
    pub command: SyncClustersCommand,
}

#[derive(Debug, Subcommand)]
pub enum SyncClustersCommand {
    /// List sync-clusters of the local site
    #[command(alias = "ls")]
    List {
        /// Only sync-clusters replicating this cluster
        #[arg(long)]
        cluster: Option<ClusterId>,
    },

    /// Create a sync-cluster replicating a local cluster
    Create {
        /// Cluster to replicate
        #[arg(long, required = true)]
        cluster: ClusterId,

        /// Sync-cluster name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TYPES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TypesArgs {
    #[command(subcommand)]
    pub command: TypesCommand,
}

#[derive(Debug, Subcommand)]
pub enum TypesCommand {
    /// List environment types
    Environments,
    /// List cluster types
    Clusters,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ADD (interactive form)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AddArgs {
    /// What to create
    #[arg(long, short = 'm', value_parser = form_mode_parser())]
    pub mode: FormMode,
}

fn form_mode_parser() -> impl TypedValueParser<Value = FormMode> {
    PossibleValuesParser::new(["site", "environment", "cluster", "sync-cluster"])
        .try_map(|value| value.parse::<FormMode>())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  WATCH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Reload period in seconds (overrides profile refresh_interval)
    #[arg(long, short = 'i', value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Display the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a profile value
    Set {
        /// Key (server, timeout, insecure, ca_cert, refresh_interval)
        key: String,
        /// Value
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
