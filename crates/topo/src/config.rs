//! CLI configuration: thin wrapper around `topo_config` shared types.
//!
//! Adds CLI-specific resolution that respects `GlobalOpts` flag overrides
//! (--server, --insecure, --timeout).

use std::time::Duration;

use topo_core::{ControllerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use topo_config::{Config, Profile, config_path, load_config, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Translate a `Profile` + global flags into a `ControllerConfig`.
///
/// CLI flag overrides take priority over profile values, which take
/// priority over `[defaults]`.
pub fn resolve_profile(
    profile: &Profile,
    config: &Config,
    global: &GlobalOpts,
) -> Result<ControllerConfig, CliError> {
    let mut controller = topo_config::profile_to_controller_config(profile, &config.defaults)?;

    if let Some(ref server) = global.server {
        controller.url = topo_config::parse_server_url(server)?;
    }
    if global.insecure {
        controller.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        controller.timeout = Duration::from_secs(secs);
    }
    Ok(controller)
}

/// Build a `ControllerConfig` from flags alone, for when no profile exists.
pub fn from_flags(global: &GlobalOpts, config: &Config) -> Result<ControllerConfig, CliError> {
    let server = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;

    let mut controller = ControllerConfig::new(topo_config::parse_server_url(server)?);
    if global.insecure || config.defaults.insecure {
        controller.tls = TlsVerification::DangerAcceptInvalid;
    }
    controller.timeout = Duration::from_secs(global.timeout.unwrap_or(config.defaults.timeout));
    Ok(controller)
}

/// Comma-separated profile names, sorted, for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    names.sort_unstable();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}
