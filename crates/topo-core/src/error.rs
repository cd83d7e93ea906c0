// ── Core error types ──
//
// User-facing errors from topo-core. Consumers see which fetch or which
// create failed, never raw HTTP plumbing. The `From<topo_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to topology server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to topology server timed out")]
    Timeout,

    // ── Reload / mutation errors ─────────────────────────────────────
    #[error("Failed to fetch {resource}: {message}")]
    Fetch {
        resource: &'static str,
        message: String,
        status: Option<u16>,
        /// Whether retrying might succeed (timeouts, 5xx, rate limits).
        transient: bool,
    },

    #[error("{operation} failed: {message}")]
    Mutation {
        operation: &'static str,
        message: String,
        status: Option<u16>,
    },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// A reload fetch failed.
    pub(crate) fn fetch(resource: &'static str, err: &topo_api::Error) -> Self {
        Self::Fetch {
            resource,
            message: err.to_string(),
            status: err.status(),
            transient: err.is_transient(),
        }
    }

    /// A create call was rejected or could not be delivered.
    pub(crate) fn mutation(operation: &'static str, err: &topo_api::Error) -> Self {
        Self::Mutation {
            operation,
            message: err.to_string(),
            status: err.status(),
        }
    }

    /// HTTP status attached to the failure, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } | Self::Mutation { status, .. } | Self::Api { status, .. } => {
                *status
            }
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<topo_api::Error> for CoreError {
    fn from(err: topo_api::Error) -> Self {
        match err {
            topo_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            topo_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            topo_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            topo_api::Error::Api { status: 404, message } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: message,
            },
            topo_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            topo_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
