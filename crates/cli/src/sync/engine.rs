// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync engine: keeps the replica in step with the remote store.
//!
//! Connecting runs health check, channel open, and a concurrent bootstrap
//! fetch of every collection. While connected, update events trigger
//! targeted refetches of the affected collections only.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use ts_core::{Collection, ConnectionStatus, SyncEvent};

use super::bus::{EventBus, Subscription};
use super::error::{SyncError, SyncResult};
use super::remote::RemoteApi;
use super::replica::ReplicaHandle;
use super::transport::{EventChannel, WebSocketChannel};

/// Configuration for the sync engine.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the REST surface.
    pub api_url: String,
    /// URL of the event channel.
    pub events_url: String,
    /// Maximum attempts to reopen a dropped channel.
    pub max_retries: u32,
    /// Maximum delay between reopen attempts (seconds).
    pub max_delay_secs: u64,
    /// Initial delay for exponential backoff (milliseconds).
    pub initial_delay_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            api_url: "http://localhost:3001/api".to_string(),
            events_url: "ws://localhost:3001/ws".to_string(),
            max_retries: 10,
            max_delay_secs: 30,
            initial_delay_ms: 100,
        }
    }
}

/// State of the connection to the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one reconcile pass.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReconcileReport {
    /// Collections replaced from a fetch.
    pub applied: Vec<Collection>,
    /// Fetches that completed but were superseded or cancelled.
    pub discarded: Vec<Collection>,
    /// Fetches that failed, with the error.
    pub failed: Vec<(Collection, String)>,
}

/// What the engine did with one event.
#[derive(Debug)]
pub enum Dispatch {
    /// Nothing to do for this event in the current state.
    Ignored,
    /// The channel reported a disconnect; the engine is now disconnected.
    ChannelDown,
    /// The full connect sequence was re-run.
    Reconnected(SyncResult<()>),
    /// A targeted refetch is running in the background.
    Refetch(JoinHandle<ReconcileReport>),
}

/// Sync engine for one remote store.
pub struct SyncEngine<C: EventChannel = WebSocketChannel> {
    config: SyncConfig,
    remote: Arc<dyn RemoteApi>,
    channel: C,
    replica: ReplicaHandle,
    bus: EventBus,
    state: ConnectionState,
    last_error: Option<String>,
    /// Cancelled when the current connection attempt is torn down.
    attempt: CancellationToken,
    /// The engine's own registration on the bus, live while connected.
    subscription: Option<Subscription>,
}

impl SyncEngine<WebSocketChannel> {
    /// Create an engine with the default WebSocket channel.
    pub fn new(config: SyncConfig, remote: Arc<dyn RemoteApi>) -> Self {
        Self::with_channel(config, remote, WebSocketChannel::new())
    }
}

impl<C: EventChannel> SyncEngine<C> {
    /// Create an engine with a custom channel (for testing).
    pub fn with_channel(config: SyncConfig, remote: Arc<dyn RemoteApi>, channel: C) -> Self {
        SyncEngine {
            config,
            remote,
            channel,
            replica: ReplicaHandle::new(),
            bus: EventBus::new(),
            state: ConnectionState::Disconnected,
            last_error: None,
            attempt: CancellationToken::new(),
            subscription: None,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Message of the most recent failed connect, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn replica(&self) -> &ReplicaHandle {
        &self.replica
    }

    /// Bus carrying every event received from the channel.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn remote(&self) -> Arc<dyn RemoteApi> {
        Arc::clone(&self.remote)
    }

    /// Run the full connect sequence.
    ///
    /// On a partial bootstrap the successful collections stay applied and
    /// the error names the ones that failed.
    pub async fn connect(&mut self) -> SyncResult<()> {
        // A new attempt supersedes anything the previous one left running
        self.attempt.cancel();
        self.attempt = CancellationToken::new();
        self.state = ConnectionState::Connecting;
        tracing::info!(url = %self.config.api_url, "connecting to remote");

        let result = self.connect_attempt().await;
        match &result {
            Ok(()) => {
                self.state = ConnectionState::Connected;
                self.last_error = None;
                tracing::info!("connected to remote");
            }
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                self.last_error = Some(e.to_string());
                tracing::warn!(error = %e, "connect failed");
            }
        }
        result
    }

    async fn connect_attempt(&mut self) -> SyncResult<()> {
        if !self.remote.health().await {
            return Err(SyncError::Unreachable);
        }

        if !self.channel.is_connected() {
            self.channel.connect(&self.config.events_url).await?;
        }
        if self.subscription.is_none() {
            self.subscription = Some(self.bus.subscribe_all());
        }

        let targets = stamp(&self.replica, &Collection::ALL);
        let report = reconcile(
            Arc::clone(&self.remote),
            self.replica.clone(),
            self.attempt.clone(),
            targets,
        )
        .await;

        if report.failed.is_empty() {
            Ok(())
        } else {
            Err(SyncError::Bootstrap {
                failed: report.failed,
            })
        }
    }

    /// Tear down the connection. The replica is kept as-is.
    pub async fn disconnect(&mut self) {
        self.attempt.cancel();
        self.subscription = None;
        if let Err(e) = self.channel.disconnect().await {
            tracing::debug!(error = %e, "error closing event channel");
        }
        self.state = ConnectionState::Disconnected;
        tracing::info!("disconnected from remote");
    }

    /// Close the channel and run the connect sequence again.
    pub async fn reconnect(&mut self) -> SyncResult<()> {
        self.disconnect().await;
        self.connect().await
    }

    /// React to one event.
    pub async fn dispatch(&mut self, event: SyncEvent) -> Dispatch {
        tracing::debug!(event = event.kind().as_str(), state = %self.state, "dispatch");
        match event {
            SyncEvent::Connection {
                status: ConnectionStatus::Connected,
            } => {
                if self.state == ConnectionState::Connected {
                    return Dispatch::Ignored;
                }
                Dispatch::Reconnected(self.connect().await)
            }
            SyncEvent::Connection {
                status: ConnectionStatus::Disconnected,
            } => {
                self.attempt.cancel();
                self.state = ConnectionState::Disconnected;
                tracing::info!("event channel reported disconnect");
                Dispatch::ChannelDown
            }
            update => {
                if self.state != ConnectionState::Connected {
                    return Dispatch::Ignored;
                }
                let targets = stamp(&self.replica, update.refetch_targets());
                Dispatch::Refetch(tokio::spawn(reconcile(
                    Arc::clone(&self.remote),
                    self.replica.clone(),
                    self.attempt.clone(),
                    targets,
                )))
            }
        }
    }

    /// Dispatch every event already delivered to the engine's subscription.
    pub async fn process_pending(&mut self) -> Vec<Dispatch> {
        let mut dispatched = Vec::new();
        loop {
            let Some(event) = self.subscription.as_mut().and_then(Subscription::try_recv) else {
                break;
            };
            dispatched.push(self.dispatch(event).await);
        }
        dispatched
    }

    /// Receive one event from the channel and publish it on the bus.
    ///
    /// Returns false once the channel has closed; a disconnect event is
    /// published in its place.
    pub async fn pump(&mut self) -> SyncResult<bool> {
        match self.channel.recv().await {
            Ok(Some(event)) => {
                self.bus.publish(event);
                Ok(true)
            }
            Ok(None) => {
                self.bus.publish(SyncEvent::disconnected());
                Ok(false)
            }
            Err(e) => {
                self.bus.publish(SyncEvent::disconnected());
                Err(e.into())
            }
        }
    }

    /// Event loop: pump the channel until `shutdown` fires.
    ///
    /// A dropped channel is reopened with exponential backoff, then the
    /// full connect sequence runs again. A connect that fails on a live
    /// channel is retried under the same policy.
    pub async fn run(&mut self, shutdown: CancellationToken) -> SyncResult<()> {
        if self.state != ConnectionState::Connected {
            self.connect().await?;
        }

        loop {
            let received = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                received = self.pump() => received,
            };
            if !self.settle(&shutdown).await? {
                break;
            }

            match received {
                Ok(true) => continue,
                Ok(false) => tracing::info!("event channel closed"),
                Err(e) => tracing::warn!(error = %e, "event channel failed"),
            }

            if !self.reopen_with_retry(&shutdown).await? {
                break;
            }
            self.bus.publish(SyncEvent::connected());
            if !self.settle(&shutdown).await? {
                break;
            }
        }

        self.disconnect().await;
        Ok(())
    }

    /// Dispatch pending events. If a reconnect among them failed while the
    /// channel is still open, retry the connect sequence with backoff.
    ///
    /// Returns false if `shutdown` fired while waiting.
    async fn settle(&mut self, shutdown: &CancellationToken) -> SyncResult<bool> {
        let dispatched = self.process_pending().await;
        let reconnect_failed = dispatched
            .iter()
            .any(|d| matches!(d, Dispatch::Reconnected(Err(_))));
        if reconnect_failed
            && self.state != ConnectionState::Connected
            && self.channel.is_connected()
        {
            return self.connect_with_retry(shutdown).await;
        }
        Ok(true)
    }

    /// Re-run the connect sequence with exponential backoff. The attempt
    /// that already failed counts as the first.
    ///
    /// Returns false if `shutdown` fired while waiting.
    async fn connect_with_retry(&mut self, shutdown: &CancellationToken) -> SyncResult<bool> {
        let mut attempt = 1;
        let mut delay_ms = self.config.initial_delay_ms;

        loop {
            if attempt >= self.config.max_retries {
                return Err(SyncError::MaxRetriesExceeded);
            }
            tracing::debug!(attempt, delay_ms, "reconnect failed, backing off");
            tokio::select! {
                _ = shutdown.cancelled() => return Ok(false),
                _ = tokio::time::sleep(Duration::from_millis(delay_ms)) => {}
            }
            delay_ms = std::cmp::min(delay_ms * 2, self.config.max_delay_secs * 1000);

            attempt += 1;
            if self.connect().await.is_ok() {
                return Ok(true);
            }
        }
    }

    /// Reopen the channel with exponential backoff.
    ///
    /// Returns false if `shutdown` fired while waiting.
    async fn reopen_with_retry(&mut self, shutdown: &CancellationToken) -> SyncResult<bool> {
        let mut attempt = 0;
        let mut delay_ms = self.config.initial_delay_ms;

        loop {
            attempt += 1;
            match self.channel.connect(&self.config.events_url).await {
                Ok(()) => return Ok(true),
                Err(e) if attempt >= self.config.max_retries => {
                    self.state = ConnectionState::Disconnected;
                    self.last_error = Some(e.to_string());
                    return Err(SyncError::MaxRetriesExceeded);
                }
                Err(e) => {
                    tracing::debug!(attempt, delay_ms, error = %e, "reopen failed, backing off");
                    tokio::select! {
                        _ = shutdown.cancelled() => return Ok(false),
                        _ = tokio::time::sleep(Duration::from_millis(delay_ms)) => {}
                    }
                    delay_ms = std::cmp::min(delay_ms * 2, self.config.max_delay_secs * 1000);
                }
            }
        }
    }
}

/// Hand out fetch sequence numbers for `collections`.
///
/// Done before any fetch starts so issue order, not completion order,
/// decides which response wins.
fn stamp(replica: &ReplicaHandle, collections: &[Collection]) -> Vec<(Collection, u64)> {
    let mut replica = replica.write();
    collections
        .iter()
        .map(|c| (*c, replica.begin_fetch(*c)))
        .collect()
}

/// Fetch `targets` concurrently and apply each result as it lands.
///
/// A result is applied only if `token` is still live and its sequence is
/// newer than what the replica already holds; both are checked under the
/// replica lock.
async fn reconcile(
    remote: Arc<dyn RemoteApi>,
    replica: ReplicaHandle,
    token: CancellationToken,
    targets: Vec<(Collection, u64)>,
) -> ReconcileReport {
    let remote = &remote;
    let mut fetches: FuturesUnordered<_> = targets
        .into_iter()
        .map(|(collection, seq)| async move { (collection, seq, remote.fetch(collection).await) })
        .collect();

    let mut report = ReconcileReport::default();
    while let Some((collection, seq, result)) = fetches.next().await {
        match result {
            Ok(data) => {
                let applied = {
                    let mut replica = replica.write();
                    !token.is_cancelled() && replica.apply_fetch(seq, data)
                };
                if applied {
                    report.applied.push(collection);
                } else {
                    tracing::debug!(%collection, seq, "discarding stale fetch");
                    report.discarded.push(collection);
                }
            }
            Err(e) => {
                tracing::warn!(%collection, error = %e, "fetch failed");
                report.failed.push((collection, e.to_string()));
            }
        }
    }
    report
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
