//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError`, `ConfigError` and `SelectionError` into user-facing
//! errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use topo_config::ConfigError;
use topo_core::{CoreError, SelectionError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to topology server at {url}")]
    #[diagnostic(
        code(topo::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             URL: {url}\n\
             Self-signed certificate? Try --insecure (-k) or set ca_cert in your profile."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(topo::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout,

    // ── Server ───────────────────────────────────────────────────────
    #[error("Failed to load {resource}: {message}")]
    #[diagnostic(
        code(topo::fetch_failed),
        help("Nothing was changed locally. Retry once the server is healthy.")
    )]
    FetchFailed {
        resource: String,
        message: String,
        status: Option<u16>,
    },

    #[error("{operation} rejected: {message}")]
    #[diagnostic(code(topo::create_failed))]
    CreateFailed {
        operation: String,
        message: String,
        status: Option<u16>,
    },

    #[error("{operation} conflicts with existing data: {message}")]
    #[diagnostic(
        code(topo::conflict),
        help("An entity with that name probably exists already. Pick another name.")
    )]
    Conflict { operation: String, message: String },

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(topo::not_found),
        help("Run: topo {list_command} to see available entries")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("API error: {message}")]
    #[diagnostic(code(topo::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(topo::validation))]
    Validation { field: String, reason: String },

    #[error("Nothing to choose for {field}")]
    #[diagnostic(
        code(topo::no_options),
        help("{hint}")
    )]
    NoOptions { field: String, hint: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(topo::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: topo config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No topology server configured")]
    #[diagnostic(
        code(topo::no_config),
        help(
            "Create a profile with: topo config init\n\
             Or pass --server / set TOPO_SERVER.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(topo::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Prompt failed: {0}")]
    #[diagnostic(
        code(topo::prompt),
        help("Interactive commands need a terminal on stdin.")
    )]
    Prompt(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(topo::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(topo::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NoOptions { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::Timeout => CliError::Timeout,

            CoreError::Fetch {
                resource,
                message,
                status,
                transient: _,
            } => CliError::FetchFailed {
                resource: resource.into(),
                message,
                status,
            },

            CoreError::Mutation {
                operation,
                message,
                status: Some(409),
            } => CliError::Conflict {
                operation: operation.replace('_', " "),
                message,
            },

            CoreError::Mutation {
                operation,
                message,
                status,
            } => CliError::CreateFailed {
                operation: operation.replace('_', " "),
                message,
                status,
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: list_command_for(&entity_type),
                resource_type: entity_type,
                identifier,
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::Config { message } => CliError::Validation {
                field: "server".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                message,
                status: None,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            other => CliError::Config(other),
        }
    }
}

impl From<SelectionError> for CliError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::UnknownOption { field, id } => CliError::NotFound {
                list_command: list_command_for(&field.to_string()),
                resource_type: field.to_string(),
                identifier: id,
            },
            other => CliError::Validation {
                field: "form".into(),
                reason: other.to_string(),
            },
        }
    }
}

/// `topo` subcommand that lists entities of the given kind.
fn list_command_for(entity_type: &str) -> String {
    match entity_type.to_ascii_lowercase().replace([' ', '_'], "-").as_str() {
        "site" => "sites list".into(),
        "environment" => "environments list".into(),
        "cluster" => "clusters list".into(),
        "sync-cluster" => "sync-clusters list".into(),
        "environment-type" => "types environments".into(),
        "cluster-type" => "types clusters".into(),
        other => format!("{other}s list"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use topo_core::FormField;

    #[test]
    fn conflict_status_maps_to_conflict_exit_code() {
        let err: CliError = CoreError::Mutation {
            operation: "create_site",
            message: "site name taken".into(),
            status: Some(409),
        }
        .into();
        assert!(matches!(err, CliError::Conflict { ref operation, .. } if operation == "create site"));
        assert_eq!(err.exit_code(), exit_code::CONFLICT);
    }

    #[test]
    fn other_mutation_failures_are_general() {
        let err: CliError = CoreError::Mutation {
            operation: "create_cluster",
            message: "boom".into(),
            status: Some(500),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn connection_and_timeout_codes() {
        let conn: CliError = CoreError::ConnectionFailed {
            url: "http://x".into(),
            reason: "refused".into(),
        }
        .into();
        assert_eq!(conn.exit_code(), exit_code::CONNECTION);
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
    }

    #[test]
    fn unknown_option_points_at_list_command() {
        let err: CliError = SelectionError::UnknownOption {
            field: FormField::EnvironmentType,
            id: "9".into(),
        }
        .into();
        match err {
            CliError::NotFound { list_command, .. } => {
                assert_eq!(list_command, "types environments");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_field_is_usage_error() {
        let err: CliError = SelectionError::MissingField(FormField::Name).into();
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
