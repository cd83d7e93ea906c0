//! Topology data layer between `topo-api` and its consumers.
//!
//! - **[`Controller`]**: facade over the topology server. [`reload()`](Controller::reload)
//!   fetches the six flat collections concurrently, aggregates them and commits
//!   one snapshot; the create operations delegate to the server and reload on
//!   success. [`Controller::oneshot()`] is the single-invocation CLI path.
//!
//! - **[`TopologyStore`]**: lock-free holder of the committed
//!   [`TopologySnapshot`], versioned by reload generation so a slow reload can
//!   never overwrite a newer one.
//!
//! - **[`SnapshotStream`]**: subscription handle with `current()` / `latest()` /
//!   `changed()` for reactive consumers.
//!
//! - **[`aggregate`]**: pure conversion of flat records into the
//!   Site → Environment → Cluster hierarchy, with sync-clusters attached to the
//!   local site's clusters.
//!
//! - **[`CreationForm`]**: cascading site → environment → cluster selection
//!   state machine that yields a [`Command`] on submission.

pub mod aggregate;
pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod selection;
pub mod source;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregate::Aggregation;
pub use command::Command;
pub use command::requests::*;
pub use config::{ControllerConfig, TlsVerification};
pub use controller::{Controller, ReloadOutcome};
pub use error::CoreError;
pub use selection::{
    Choice, CreationForm, FieldPolicy, FieldSet, FormField, FormMode, SelectionError,
    SelectionState,
};
pub use source::TopologySource;
pub use store::{TopologySnapshot, TopologyStore};
pub use stream::{SnapshotStream, SnapshotWatchStream};

pub use model::{
    Cluster, ClusterId, ClusterType, ClusterTypeId, Environment, EnvironmentId, EnvironmentType,
    EnvironmentTypeId, Locality, Site, SiteId, SyncCluster, SyncClusterId,
};
