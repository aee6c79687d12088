// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed fan-out of channel events.
//!
//! Each registration returns a [`Subscription`] that receives the events of
//! the kinds it asked for. Dropping the subscription unregisters it, so a
//! handler can never outlive the owner that created it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::mpsc;
use ts_core::{EventKind, SyncEvent};

use crate::lock;

struct Subscriber {
    id: u64,
    kinds: Vec<EventKind>,
    tx: mpsc::UnboundedSender<SyncEvent>,
}

#[derive(Default)]
struct BusInner {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<Subscriber>>,
}

/// Event bus. Cloning shares the same set of subscribers.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register for the given event kinds.
    pub fn subscribe(&self, kinds: &[EventKind]) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.inner.subscribers).push(Subscriber {
            id,
            kinds: kinds.to_vec(),
            tx,
        });
        Subscription {
            id,
            rx,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Register for every event kind.
    pub fn subscribe_all(&self) -> Subscription {
        self.subscribe(&EventKind::ALL)
    }

    /// Deliver `event` to every matching subscriber.
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&self, event: SyncEvent) -> usize {
        let kind = event.kind();
        let mut subscribers = lock(&self.inner.subscribers);
        // Receivers dropped without unsubscribing are pruned here
        subscribers.retain(|s| !s.tx.is_closed());
        subscribers
            .iter()
            .filter(|s| s.kinds.contains(&kind))
            .filter(|s| s.tx.send(event).is_ok())
            .count()
    }

    /// Number of live registrations.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner.subscribers).len()
    }
}

/// A live registration on an [`EventBus`].
pub struct Subscription {
    id: u64,
    rx: mpsc::UnboundedReceiver<SyncEvent>,
    bus: Weak<BusInner>,
}

impl Subscription {
    /// Wait for the next event. Returns `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<SyncEvent> {
        self.rx.recv().await
    }

    /// Take the next already-delivered event, if any.
    pub fn try_recv(&mut self) -> Option<SyncEvent> {
        self.rx.try_recv().ok()
    }

    /// Unregister explicitly. Equivalent to dropping the subscription.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            lock(&bus.subscribers).retain(|s| s.id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
