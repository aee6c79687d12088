// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod endpoint;
pub mod forward;
pub mod mode;
pub mod session;
pub mod status;
pub mod sync;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{default_config_path, Config};
use crate::env;
use crate::error::{Error, Result};
use crate::http::{HttpRemote, HttpSessionRpc};
use crate::kv::{KvStore, SqliteStore};
use crate::session::{LocalSessions, SessionManager};
use crate::sync::{ModeController, RemoteApi, SyncEngine};

/// Everything a command needs: the loaded configuration and the durable
/// key-value store.
pub struct Context {
    pub config: Config,
    pub store: Arc<dyn KvStore>,
}

impl Context {
    pub fn new(config: Config, store: Arc<dyn KvStore>) -> Self {
        Context { config, store }
    }

    /// Load configuration and open the state store.
    ///
    /// The config path is `--config`, then `TABSYNC_CONFIG`, then the
    /// platform default. `TABSYNC_STATE_DIR` and `TABSYNC_API_URL` override
    /// the file.
    pub fn open(config_path: Option<&Path>) -> Result<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(env::config_path)
            .unwrap_or_else(default_config_path);
        let mut config = Config::load(&path)?;
        if let Some(dir) = env::state_dir() {
            config.state_dir = Some(dir);
        }
        if let Some(url) = env::api_url() {
            config.remote.api_url = url;
        }

        let db_path = config.state_db_path();
        tracing::debug!(config = %path.display(), state = %db_path.display(), "opening context");
        let store = SqliteStore::open(&db_path)?;
        Ok(Context::new(config, Arc::new(store)))
    }

    /// API base URL after applying the saved endpoint override.
    pub fn api_url(&self) -> String {
        self.config.effective_api_url(self.store.as_ref())
    }

    pub fn remote(&self) -> Arc<dyn RemoteApi> {
        Arc::new(HttpRemote::new(
            self.api_url(),
            self.config.remote.request_timeout(),
        ))
    }

    /// Mode controller over a WebSocket engine for the current endpoint.
    ///
    /// Nothing connects until the caller resumes or switches.
    pub fn controller(&self) -> ModeController {
        let api_url = self.api_url();
        let engine = SyncEngine::new(self.config.remote.sync_config(&api_url), self.remote());
        ModeController::new(Arc::clone(&self.store), engine)
    }

    pub fn local_sessions(&self) -> LocalSessions {
        LocalSessions::new(Arc::clone(&self.store))
    }

    /// Session manager for the configured session service.
    pub fn sessions(&self) -> Result<SessionManager> {
        let sessions = self
            .config
            .sessions
            .as_ref()
            .ok_or(Error::SessionsNotConfigured)?;
        let rpc = HttpSessionRpc::new(
            sessions.url.as_str(),
            sessions.api_key.as_str(),
            self.config.remote.request_timeout(),
        );
        Ok(SessionManager::new(Arc::new(rpc), self.local_sessions()))
    }

    pub fn state_db_path(&self) -> PathBuf {
        self.config.state_db_path()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
