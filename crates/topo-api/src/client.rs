// Topology API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining and response decoding.
// Endpoint methods live in per-resource files (sites, environments,
// clusters) as inherent impls to keep this module about transport only.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Error body shape some deployments return alongside a 4xx/5xx status.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Raw HTTP client for the topology server.
///
/// Every fetch returns the decoded flat record list; every create returns
/// `Ok(())` on a 2xx and ignores the body.
pub struct TopologyClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TopologyClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the server root (e.g. `https://topology.internal:8080`);
    /// endpoint paths are joined under `{base_url}/api/`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
        }
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("api/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode a JSON array body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let url = self.api_url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let body = check_status(resp).await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    /// Send a POST request with a JSON body, discarding the response body.
    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.api_url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        let text = check_status(resp).await?;
        trace!(len = text.len(), "create response discarded");
        Ok(())
    }
}

/// Make sure the base URL path ends in `/` so `Url::join` appends
/// instead of replacing the last segment.
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Return the body text on 2xx, or an `Error::Api` carrying the best
/// message we can extract.
async fn check_status(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();
    let body = resp.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    let message = serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .and_then(|e| e.message.or(e.error))
        .unwrap_or_else(|| {
            if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_owned()
            } else {
                body.chars().take(200).collect()
            }
        });

    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}
