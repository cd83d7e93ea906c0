// ── Domain model ──
//
// Canonical topology types built by the aggregation pass. The wire
// records in `topo_api` are flat; everything here is hierarchical.

mod catalog;
mod ids;
mod topology;

pub use catalog::{ClusterType, EnvironmentType};
pub use ids::{ClusterId, ClusterTypeId, EnvironmentId, EnvironmentTypeId, SiteId, SyncClusterId};
pub use topology::{Cluster, Environment, Locality, Site, SyncCluster};
