// ── Core identity types ──
//
// Every topology entity is keyed by a server-assigned integer. Each kind
// gets its own newtype so an environment id can never be passed where a
// cluster id is expected.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! topology_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// The raw wire value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

topology_id!(
    /// Identifier of a [`Site`](super::Site).
    SiteId
);
topology_id!(
    /// Identifier of an [`Environment`](super::Environment).
    EnvironmentId
);
topology_id!(
    /// Identifier of a [`Cluster`](super::Cluster).
    ClusterId
);
topology_id!(
    /// Identifier of a [`SyncCluster`](super::SyncCluster).
    SyncClusterId
);
topology_id!(
    /// Catalog identifier of an [`EnvironmentType`](super::EnvironmentType).
    EnvironmentTypeId
);
topology_id!(
    /// Catalog identifier of a [`ClusterType`](super::ClusterType).
    ClusterTypeId
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        let id: ClusterId = " 42 ".parse().unwrap();
        assert_eq!(id, ClusterId::new(42));
        assert_eq!(id.to_string(), "42");
        assert_eq!(u64::from(id), 42);
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert!("abc".parse::<SiteId>().is_err());
        assert!("-1".parse::<SiteId>().is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&EnvironmentId::new(10)).unwrap();
        assert_eq!(json, "10");
        let back: EnvironmentId = serde_json::from_str("10").unwrap();
        assert_eq!(back, EnvironmentId::new(10));
    }
}
