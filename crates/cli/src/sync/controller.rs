// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mode controller: owns the persisted operating mode and drives the sync
//! engine through mode changes.
//!
//! Switches take `&mut self`, so two switches can never interleave.

use std::sync::Arc;

use ts_core::Action;

use super::engine::{ConnectionState, SyncEngine};
use super::error::SyncResult;
use super::forwarder::ActionForwarder;
use super::transport::{EventChannel, WebSocketChannel};
use crate::error::Result;
use crate::kv::KvStore;
use crate::mode::{OperatingMode, SharedMode};

/// Point-in-time view of the sync layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncStatus {
    pub mode: OperatingMode,
    pub state: ConnectionState,
    pub last_error: Option<String>,
}

pub struct ModeController<C: EventChannel = WebSocketChannel> {
    store: Arc<dyn KvStore>,
    mode: SharedMode,
    engine: SyncEngine<C>,
    forwarder: ActionForwarder,
}

impl<C: EventChannel> ModeController<C> {
    /// Build a controller around `engine`, starting from the persisted mode.
    ///
    /// Nothing connects until [`resume`](Self::resume) or a switch.
    pub fn new(store: Arc<dyn KvStore>, engine: SyncEngine<C>) -> Self {
        let mode = SharedMode::new(OperatingMode::load(store.as_ref()));
        let forwarder = ActionForwarder::new(mode.clone(), engine.remote());
        ModeController {
            store,
            mode,
            engine,
            forwarder,
        }
    }

    pub fn mode(&self) -> OperatingMode {
        self.mode.get()
    }

    /// Shared view of the mode for other components.
    pub fn shared_mode(&self) -> SharedMode {
        self.mode.clone()
    }

    pub fn engine(&self) -> &SyncEngine<C> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SyncEngine<C> {
        &mut self.engine
    }

    pub fn forwarder(&self) -> &ActionForwarder {
        &self.forwarder
    }

    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            mode: self.mode(),
            state: self.engine.state(),
            last_error: self.engine.last_error().map(str::to_string),
        }
    }

    /// Persist `target` and enter or leave networked operation.
    ///
    /// Switching to the current mode only re-persists it. A failed connect
    /// leaves the mode switched and is returned.
    pub async fn switch_mode(&mut self, target: OperatingMode) -> Result<()> {
        target.save(self.store.as_ref())?;

        let current = self.mode.get();
        if current == target {
            tracing::debug!(mode = %target, "mode unchanged");
            return Ok(());
        }

        tracing::info!(from = %current, to = %target, "switching mode");
        self.mode.set(target);
        match target {
            OperatingMode::Networked => self.engine.connect().await?,
            OperatingMode::Local => self.engine.disconnect().await,
        }
        Ok(())
    }

    /// Startup hook: connect if the persisted mode is networked.
    pub async fn resume(&mut self) -> SyncResult<()> {
        if self.mode().is_networked() {
            self.engine.connect().await?;
        }
        Ok(())
    }

    /// Apply `action` to the replica, then forward it.
    ///
    /// The local change stays even if forwarding fails.
    pub async fn perform(&self, action: &Action) -> SyncResult<bool> {
        self.engine.replica().write().apply_local(action);
        self.forwarder.forward(action).await
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
