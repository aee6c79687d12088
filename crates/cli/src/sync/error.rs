// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ts_core::Collection;

use super::remote::RemoteError;
use super::transport::TransportError;

/// Error type for sync operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The health check failed, so the channel was never opened.
    #[error("backend not reachable")]
    Unreachable,

    /// Event channel error.
    #[error("event channel error: {0}")]
    Channel(#[from] TransportError),

    /// One or more bootstrap fetches failed. Successful ones were applied.
    #[error("failed to load {}", describe(.failed))]
    Bootstrap { failed: Vec<(Collection, String)> },

    /// A forwarded action was rejected or never reached the remote.
    #[error("failed to forward {action}: {source}")]
    Forward {
        action: &'static str,
        #[source]
        source: RemoteError,
    },

    /// An action could not be encoded or decoded.
    #[error("invalid action: {0}")]
    Action(#[from] ts_core::Error),

    /// Not connected.
    #[error("not connected to remote")]
    NotConnected,

    /// Max retries exceeded.
    #[error("max reconnection retries exceeded")]
    MaxRetriesExceeded,
}

impl SyncError {
    /// Collections whose bootstrap fetch failed, if this is a bootstrap error.
    pub fn failed_collections(&self) -> Vec<Collection> {
        match self {
            SyncError::Bootstrap { failed } => failed.iter().map(|(c, _)| *c).collect(),
            _ => Vec::new(),
        }
    }
}

fn describe(failed: &[(Collection, String)]) -> String {
    failed
        .iter()
        .map(|(c, e)| format!("{} ({})", c, e))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
