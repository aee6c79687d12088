// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mirrors local mutation intents onto the remote store.
//!
//! In local mode forwarding is a no-op. In networked mode every action maps
//! to exactly one remote call. Failures are logged and returned; nothing is
//! retried or rolled back, and nothing is queued while disconnected.

use std::sync::Arc;

use ts_core::Action;

use super::error::{SyncError, SyncResult};
use super::remote::{RemoteApi, RemoteCall};
use crate::mode::SharedMode;

pub struct ActionForwarder {
    mode: SharedMode,
    remote: Arc<dyn RemoteApi>,
}

impl ActionForwarder {
    pub fn new(mode: SharedMode, remote: Arc<dyn RemoteApi>) -> Self {
        ActionForwarder { mode, remote }
    }

    /// Forward one action. Returns `Ok(false)` when nothing was sent.
    pub async fn forward(&self, action: &Action) -> SyncResult<bool> {
        if self.mode.get().is_local() {
            return Ok(false);
        }

        let call = RemoteCall::for_action(action).map_err(ts_core::Error::from)?;
        match self.remote.call(call).await {
            Ok(()) => {
                tracing::debug!(action = action.name(), "forwarded action");
                Ok(true)
            }
            Err(source) => {
                tracing::error!(action = action.name(), error = %source, "failed to forward action");
                Err(SyncError::Forward {
                    action: action.name(),
                    source,
                })
            }
        }
    }

    /// Forward an action given in string-keyed form.
    ///
    /// Unknown action names are ignored; a payload that does not fit the
    /// named action is an error.
    pub async fn forward_named(&self, name: &str, payload: serde_json::Value) -> SyncResult<bool> {
        match Action::from_named(name, payload)? {
            Some(action) => self.forward(&action).await,
            None => {
                tracing::debug!(action = name, "ignoring unknown action");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
#[path = "forwarder_tests.rs"]
mod tests;
