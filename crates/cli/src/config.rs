// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration.
//!
//! Configuration is read from `tabsync.toml` and includes:
//! - `[remote]`: REST and event channel endpoints, timeouts and reconnect policy
//! - `[sessions]`: the session service endpoint and key (optional)
//! - `state_dir`: where the durable key-value store lives
//!
//! A missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::kv::{keys, KvStore};
use crate::sync::SyncConfig;

const APP_DIR_NAME: &str = "tabsync";
const CONFIG_FILE_NAME: &str = "tabsync.toml";
const STATE_DB_FILE_NAME: &str = "state.db";

/// Client configuration stored in `tabsync.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    /// Session service (optional - session commands are unavailable without it).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions: Option<SessionsConfig>,
    /// Directory for durable state (default: the platform data dir).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

/// Remote store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the REST surface (default: "http://localhost:3001/api").
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Event channel URL. Derived from `api_url` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_url: Option<String>,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Maximum attempts to reopen a dropped event channel (default: 10).
    #[serde(default = "default_reconnect_max_retries")]
    pub reconnect_max_retries: u32,
    /// Maximum delay between reopen attempts in seconds (default: 30).
    #[serde(default = "default_reconnect_max_delay_secs")]
    pub reconnect_max_delay_secs: u64,
    /// First backoff delay in milliseconds (default: 100).
    #[serde(default = "default_reconnect_initial_delay_ms")]
    pub reconnect_initial_delay_ms: u64,
}

/// Session service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionsConfig {
    pub url: String,
    pub api_key: String,
}

fn default_api_url() -> String {
    "http://localhost:3001/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_reconnect_max_retries() -> u32 {
    10
}

fn default_reconnect_max_delay_secs() -> u64 {
    30
}

fn default_reconnect_initial_delay_ms() -> u64 {
    100
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            api_url: default_api_url(),
            events_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            reconnect_max_retries: default_reconnect_max_retries(),
            reconnect_max_delay_secs: default_reconnect_max_delay_secs(),
            reconnect_initial_delay_ms: default_reconnect_initial_delay_ms(),
        }
    }
}

impl RemoteConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Sync engine settings for the given API base URL.
    pub fn sync_config(&self, api_url: &str) -> SyncConfig {
        SyncConfig {
            api_url: api_url.to_string(),
            events_url: self
                .events_url
                .clone()
                .unwrap_or_else(|| derive_events_url(api_url)),
            max_retries: self.reconnect_max_retries,
            max_delay_secs: self.reconnect_max_delay_secs,
            initial_delay_ms: self.reconnect_initial_delay_ms,
        }
    }
}

/// Event channel URL served next to a REST base URL.
///
/// `http://host:3001/api` becomes `ws://host:3001/ws`; `https` maps to `wss`.
pub fn derive_events_url(api_url: &str) -> String {
    let trimmed = api_url.trim_end_matches('/');
    let (scheme, rest) = match trimmed.split_once("://") {
        Some(("https", rest)) => ("wss", rest),
        Some((_, rest)) => ("ws", rest),
        None => ("ws", trimmed),
    };
    let host = rest.strip_suffix("/api").unwrap_or(rest);
    format!("{}://{}/ws", scheme, host)
}

impl Config {
    /// Load configuration from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// API base URL to use: the endpoint override saved in `store` wins
    /// over the configured one.
    pub fn effective_api_url(&self, store: &dyn KvStore) -> String {
        match store.get(keys::API_BASE_URL) {
            Ok(Some(url)) if !url.trim().is_empty() => url.trim().to_string(),
            Ok(_) => self.remote.api_url.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read endpoint override");
                self.remote.api_url.clone()
            }
        }
    }

    /// Directory for durable state.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(default_state_dir)
    }

    pub fn state_db_path(&self) -> PathBuf {
        self.state_dir().join(STATE_DB_FILE_NAME)
    }
}

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// Default state directory.
pub fn default_state_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".tabsync"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
