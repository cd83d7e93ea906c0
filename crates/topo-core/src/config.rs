// ── Runtime connection configuration ──
//
// Describes *how* to reach the topology server. Never touches disk: the
// CLI builds a `ControllerConfig` from its profile and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed lab servers).
    DangerAcceptInvalid,
}

/// Configuration for talking to one topology server.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Server root URL (e.g., `https://topology.internal:8080`).
    pub url: Url,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Background reload period in seconds. 0 = never.
    pub refresh_interval_secs: u64,
}

impl ControllerConfig {
    /// Config with default TLS, a 30s timeout and background refresh off.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            refresh_interval_secs: 0,
        }
    }

    pub(crate) fn transport(&self) -> topo_api::TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => topo_api::TlsMode::System,
            TlsVerification::CustomCa(path) => topo_api::TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => topo_api::TlsMode::DangerAcceptInvalid,
        };
        topo_api::TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
