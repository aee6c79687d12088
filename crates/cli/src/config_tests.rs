// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::kv::MemoryStore;
use tempfile::TempDir;
use yare::parameterized;

#[test]
fn test_missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load(&temp.path().join("absent.toml")).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.remote.api_url, "http://localhost:3001/api");
    assert_eq!(config.remote.reconnect_max_retries, 10);
    assert!(config.sessions.is_none());
}

#[test]
fn test_partial_file_fills_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tabsync.toml");
    fs::write(
        &path,
        r#"
state_dir = "/var/lib/tabsync"

[remote]
api_url = "https://pos.example.com/api"
reconnect_max_retries = 3

[sessions]
url = "https://sessions.example.com"
api_key = "anon"
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.remote.api_url, "https://pos.example.com/api");
    assert_eq!(config.remote.reconnect_max_retries, 3);
    assert_eq!(config.remote.request_timeout_secs, 10);
    assert_eq!(config.sessions.as_ref().unwrap().api_key, "anon");
    assert_eq!(
        config.state_db_path(),
        PathBuf::from("/var/lib/tabsync/state.db")
    );
}

#[test]
fn test_malformed_file_is_config_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tabsync.toml");
    fs::write(&path, "[remote\napi_url = ").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_save_then_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("tabsync.toml");
    let mut config = Config::default();
    config.remote.events_url = Some("ws://10.0.0.2:3001/ws".to_string());

    config.save(&path).unwrap();
    assert_eq!(Config::load(&path).unwrap(), config);
}

#[parameterized(
    default_api = { "http://localhost:3001/api", "ws://localhost:3001/ws" },
    trailing_slash = { "http://localhost:3001/api/", "ws://localhost:3001/ws" },
    tls = { "https://pos.example.com/api", "wss://pos.example.com/ws" },
    no_api_suffix = { "http://10.0.0.5:8080", "ws://10.0.0.5:8080/ws" },
)]
fn test_derive_events_url(api: &str, expected: &str) {
    assert_eq!(derive_events_url(api), expected);
}

#[test]
fn test_explicit_events_url_wins() {
    let mut remote = RemoteConfig::default();
    remote.events_url = Some("ws://relay:9000/events".to_string());

    let sync = remote.sync_config("http://localhost:3001/api");
    assert_eq!(sync.events_url, "ws://relay:9000/events");
    assert_eq!(sync.max_delay_secs, 30);
    assert_eq!(sync.initial_delay_ms, 100);
}

#[test]
fn test_endpoint_override_from_store() {
    let store = MemoryStore::new();
    let config = Config::default();
    assert_eq!(config.effective_api_url(&store), "http://localhost:3001/api");

    store.set(keys::API_BASE_URL, "http://192.168.1.20:3001/api").unwrap();
    assert_eq!(config.effective_api_url(&store), "http://192.168.1.20:3001/api");

    store.set(keys::API_BASE_URL, "  ").unwrap();
    assert_eq!(config.effective_api_url(&store), "http://localhost:3001/api");
}
