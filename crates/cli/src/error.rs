// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::kv::StoreError;
use crate::sync::{RemoteError, SyncError};

/// All possible errors that can occur in the tabsync library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid mode: '{0}'\n  hint: valid modes are: local, networked")]
    InvalidMode(String),

    #[error("session service is not configured\n  hint: set [sessions] url and api_key in tabsync.toml")]
    SessionsNotConfigured,

    #[error("invalid endpoint '{0}'\n  hint: use an http:// or https:// URL, e.g. http://10.0.0.2:3001/api")]
    InvalidEndpoint(String),

    #[error("session unavailable\n  hint: check that the session service is reachable")]
    SessionUnavailable,

    #[error("session rejected: {0}")]
    SessionRejected(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Core(#[from] ts_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for tabsync operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
