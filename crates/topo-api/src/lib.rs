// topo-api: Async Rust client for the topology REST API
//
// Flat record collections in, success/failure out. Aggregation into the
// site -> environment -> cluster hierarchy happens in `topo-core`.

pub mod client;
pub mod clusters;
pub mod environments;
pub mod error;
pub mod models;
pub mod sites;
pub mod transport;

pub use client::TopologyClient;
pub use error::Error;
pub use models::{
    ClusterRecord, ClusterTypeRecord, EnvironmentRecord, EnvironmentTypeRecord, NewCluster,
    NewEnvironment, NewSite, NewSyncCluster, SiteRecord, SyncClusterRecord,
};
pub use transport::{TlsMode, TransportConfig};
