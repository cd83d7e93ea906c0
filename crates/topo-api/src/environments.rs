// Environment endpoints, plus the environment-type catalog.

use tracing::debug;

use crate::client::TopologyClient;
use crate::error::Error;
use crate::models::{EnvironmentRecord, EnvironmentTypeRecord, NewEnvironment};

impl TopologyClient {
    /// List every environment across all sites.
    ///
    /// `GET /api/environments`
    pub async fn list_environments(&self) -> Result<Vec<EnvironmentRecord>, Error> {
        debug!("listing environments");
        self.get("environments").await
    }

    /// List the environment-type catalog.
    ///
    /// `GET /api/environment-types`
    pub async fn list_environment_types(&self) -> Result<Vec<EnvironmentTypeRecord>, Error> {
        debug!("listing environment types");
        self.get("environment-types").await
    }

    /// Create an environment under a site.
    ///
    /// `POST /api/sites/{site_id}/environments`
    pub async fn create_environment(&self, env: &NewEnvironment) -> Result<(), Error> {
        debug!(site_id = env.site_id, name = %env.name, "creating environment");
        self.post_no_response(&format!("sites/{}/environments", env.site_id), env)
            .await
    }
}
