// Site endpoints
//
// Sites are top-level: listing and creation are not scoped by any parent.

use tracing::debug;

use crate::client::TopologyClient;
use crate::error::Error;
use crate::models::{NewSite, SiteRecord};

impl TopologyClient {
    /// List every site, local and remote.
    ///
    /// `GET /api/sites`
    pub async fn list_sites(&self) -> Result<Vec<SiteRecord>, Error> {
        debug!("listing sites");
        self.get("sites").await
    }

    /// Create a site.
    ///
    /// `POST /api/sites` with `{"name": "...", "physical_location": "N"}`
    pub async fn create_site(&self, site: &NewSite) -> Result<(), Error> {
        debug!(name = %site.name, "creating site");
        self.post_no_response("sites", site).await
    }
}
