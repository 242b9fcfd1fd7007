//! `YamlConfigStore` and the config service on a temporary file.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use tempfile::TempDir;
use trmm_lam::application::ports::ConfigStore;
use trmm_lam::application::services::config_service::{load_config, set_value};
use trmm_lam::domain::ConfigError;
use trmm_lam::domain::config::{DEFAULT_SESSION_TIMEOUT_SECS, LamConfig};
use trmm_lam::infra::config::YamlConfigStore;

fn store() -> (TempDir, YamlConfigStore) {
    let dir = TempDir::new().expect("temp dir");
    let store = YamlConfigStore::at(dir.path().join("nested").join("config.yaml"));
    (dir, store)
}

#[test]
fn test_missing_file_loads_defaults() {
    let (_dir, store) = store();
    assert_eq!(load_config(&store).unwrap(), LamConfig::default());
}

#[test]
fn test_set_value_persists_and_reloads() {
    let (_dir, store) = store();
    set_value(&store, "api.url", "https://api.example.com/").unwrap();
    set_value(&store, "session.timeout_secs", "12").unwrap();

    let cfg = load_config(&store).unwrap();
    assert_eq!(cfg.api.url.as_deref(), Some("https://api.example.com"));
    assert_eq!(cfg.session.timeout_secs, 12);
    assert!(cfg.api.key.is_none());
}

#[test]
fn test_saved_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, store) = store();
    set_value(&store, "api.key", "secret").unwrap();
    let mode = std::fs::metadata(store.path().unwrap())
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_invalid_value_is_not_saved() {
    let (_dir, store) = store();
    let err = set_value(&store, "session.timeout_secs", "0").unwrap_err();
    assert!(err.downcast_ref::<ConfigError>().is_some(), "got: {err}");
    assert!(!store.path().unwrap().exists());
}

#[test]
fn test_unknown_key_lists_valid_keys() {
    let (_dir, store) = store();
    let err = set_value(&store, "api.token", "x").unwrap_err();
    assert!(err.to_string().contains("api.url"), "got: {err}");
}

#[test]
fn test_corrupt_file_is_reported() {
    let (_dir, store) = store();
    let path = store.path().unwrap();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "api: [unterminated").unwrap();

    let err = load_config(&store).unwrap_err();
    assert!(format!("{err:#}").contains("cannot parse"), "got: {err:#}");
}

#[test]
fn test_partial_file_keeps_default_timeout() {
    let (_dir, store) = store();
    let path = store.path().unwrap();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "agent:\n  download_url: https://dl.example.com/agent\n").unwrap();

    let cfg = load_config(&store).unwrap();
    assert_eq!(cfg.agent_reference(), "https://dl.example.com/agent");
    assert_eq!(cfg.session.timeout_secs, DEFAULT_SESSION_TIMEOUT_SECS);
}
