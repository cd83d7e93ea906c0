// ── Type catalogs ──
//
// Environment and cluster types are flat lookup lists used to label
// entities and populate the type pickers on creation forms.

use serde::Serialize;

use super::ids::{ClusterTypeId, EnvironmentTypeId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentType {
    pub id: EnvironmentTypeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterType {
    pub id: ClusterTypeId,
    pub name: String,
}
