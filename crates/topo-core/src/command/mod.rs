// ── Command API ──
//
// Every write against the topology server is one `Command` variant. The
// controller validates it, routes it to the matching data-access call and
// reloads on success.

pub mod requests;

use strum::IntoStaticStr;

use crate::error::CoreError;

pub use requests::{
    CreateClusterRequest, CreateEnvironmentRequest, CreateSiteRequest, CreateSyncClusterRequest,
};

/// All write operations against a topology server.
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    CreateSite(CreateSiteRequest),
    CreateEnvironment(CreateEnvironmentRequest),
    CreateCluster(CreateClusterRequest),
    CreateSyncCluster(CreateSyncClusterRequest),
}

impl Command {
    /// Stable operation name for logs and error messages.
    pub fn operation(&self) -> &'static str {
        self.into()
    }

    /// The name of the entity being created.
    pub fn name(&self) -> &str {
        match self {
            Self::CreateSite(r) => &r.name,
            Self::CreateEnvironment(r) => &r.name,
            Self::CreateCluster(r) => &r.name,
            Self::CreateSyncCluster(r) => &r.name,
        }
    }

    fn name_mut(&mut self) -> &mut String {
        match self {
            Self::CreateSite(r) => &mut r.name,
            Self::CreateEnvironment(r) => &mut r.name,
            Self::CreateCluster(r) => &mut r.name,
            Self::CreateSyncCluster(r) => &mut r.name,
        }
    }

    /// Trim the entity name and reject it when nothing is left.
    pub fn validated(mut self) -> Result<Self, CoreError> {
        let trimmed = self.name().trim();
        if trimmed.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: format!("{}: name must not be empty", self.operation()),
            });
        }
        let trimmed = trimmed.to_owned();
        *self.name_mut() = trimmed;
        Ok(self)
    }
}
