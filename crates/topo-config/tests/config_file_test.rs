#![allow(clippy::unwrap_used)]
// File round-trip tests for topo-config using temporary directories.

use pretty_assertions::assert_eq;
use topo_config::{Config, Profile, load_config_from, save_config_to};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg.defaults.output, "table");
    assert_eq!(cfg.active_profile_name(), "default");
}

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut cfg = Config::default();
    let mut lab = Profile::new("http://127.0.0.1:8080");
    lab.timeout = Some(10);
    cfg.profiles.insert("lab".into(), lab);
    cfg.default_profile = Some("lab".into());

    save_config_to(&cfg, &path).unwrap();
    let loaded = load_config_from(&path).unwrap();

    assert_eq!(loaded.active_profile_name(), "lab");
    let profile = loaded.profile("lab").unwrap();
    assert_eq!(profile.server, "http://127.0.0.1:8080");
    assert_eq!(profile.timeout, Some(10));
}

#[test]
fn toml_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
default_profile = "prod"

[defaults]
output = "json"
timeout = 12

[profiles.prod]
server = "https://topology.example"
insecure = true
"#,
    )
    .unwrap();

    let cfg = load_config_from(&path).unwrap();
    assert_eq!(cfg.defaults.output, "json");
    assert_eq!(cfg.defaults.timeout, 12);
    assert_eq!(cfg.defaults.color, "auto");
    assert_eq!(cfg.profile("prod").unwrap().insecure, Some(true));
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "default_profile = [").unwrap();
    assert!(load_config_from(&path).is_err());
}
