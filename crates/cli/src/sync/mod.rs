// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dual-mode synchronization with the remote store.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Mode      │────►│    Sync     │◄────│   Event     │◄──── remote
//! │  Controller  │     │   Engine    │     │  Channel    │      events
//! └──────────────┘     └─────────────┘     └─────────────┘
//!        │                    │
//!        ▼                    ▼
//! ┌──────────────┐     ┌─────────────┐
//! │   Action     │────►│  Remote     │────► REST surface
//! │  Forwarder   │     │  (trait)    │
//! └──────────────┘     └─────────────┘
//! ```
//!
//! # Features
//!
//! - Health check, channel open and concurrent bootstrap on connect
//! - Targeted refetch per update event, stale responses discarded
//! - Typed event bus with drop-to-unsubscribe handles
//! - Channel reopen with exponential backoff
//! - Injectable remote and channel traits for testing

mod bus;
mod controller;
mod engine;
mod error;
mod forwarder;
mod remote;
mod replica;
mod transport;

pub use bus::{EventBus, Subscription};
pub use controller::{ModeController, SyncStatus};
pub use engine::{ConnectionState, Dispatch, ReconcileReport, SyncConfig, SyncEngine};
pub use error::{SyncError, SyncResult};
pub use forwarder::ActionForwarder;
pub use remote::{
    collection_path, Method, RemoteApi, RemoteCall, RemoteError, RemoteFuture, RemoteResult,
};
pub use replica::{Replica, ReplicaHandle};
pub use transport::{EventChannel, TransportError, TransportResult, WebSocketChannel};

#[cfg(test)]
pub(crate) mod test_helpers;
