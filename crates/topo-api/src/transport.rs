// HTTP transport settings for the topology client.
//
// Only timeout and certificate trust are configurable; everything else
// uses reqwest's defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::error::Error;

const USER_AGENT: &str = concat!("topo/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How the server certificate is trusted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsMode {
    #[default]
    System,
    /// Trust the PEM bundle at this path in addition to the system roots.
    CustomCa(PathBuf),
    /// No verification at all. Lab servers only.
    DangerAcceptInvalid,
}

impl TlsMode {
    fn apply(&self, builder: ClientBuilder) -> Result<ClientBuilder, Error> {
        Ok(match self {
            Self::System => builder,
            Self::CustomCa(path) => builder.add_root_certificate(read_ca(path)?),
            Self::DangerAcceptInvalid => builder.danger_accept_invalid_certs(true),
        })
    }
}

fn read_ca(path: &Path) -> Result<reqwest::Certificate, Error> {
    let pem = std::fs::read(path)
        .map_err(|e| Error::Tls(format!("cannot read CA bundle {}: {e}", path.display())))?;
    reqwest::Certificate::from_pem(&pem)
        .map_err(|e| Error::Tls(format!("{} is not a PEM certificate: {e}", path.display())))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub tls: TlsMode,
    /// Whole-request timeout, connect included.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);

        self.tls
            .apply(builder)?
            .build()
            .map_err(|e| Error::Tls(format!("cannot build HTTP client: {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tls_message(result: Result<reqwest::Client, Error>) -> String {
        match result {
            Err(Error::Tls(msg)) => msg,
            Err(other) => panic!("expected a TLS error, got {other:?}"),
            Ok(_) => panic!("expected a TLS error, got a client"),
        }
    }

    #[test]
    fn default_uses_system_roots() {
        let config = TransportConfig::default();
        assert_eq!(config.tls, TlsMode::System);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.build_client().is_ok());
    }

    #[test]
    fn accept_invalid_builds() {
        let config = TransportConfig {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(1),
        };
        assert!(config.build_client().is_ok());
    }

    #[test]
    fn missing_ca_bundle_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.pem");
        let config = TransportConfig {
            tls: TlsMode::CustomCa(path.clone()),
            ..TransportConfig::default()
        };

        let msg = tls_message(config.build_client());
        assert!(msg.starts_with("cannot read CA bundle"), "{msg}");
        assert!(msg.contains(&path.display().to_string()), "{msg}");
    }
}
