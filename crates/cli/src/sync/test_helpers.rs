// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use tokio::sync::oneshot;
use ts_core::{
    Bill, BillStatus, Collection, CollectionData, MenuItem, Order, OrderStatus, PaymentMethod,
    Settings, SyncEvent, Transaction,
};

use super::remote::{RemoteApi, RemoteCall, RemoteError, RemoteFuture, RemoteResult};
use super::transport::{EventChannel, TransportError, TransportResult};

pub fn menu_item(id: &str, name: &str) -> MenuItem {
    MenuItem {
        id: id.into(),
        name: name.into(),
        price: 120.0,
        category: "snacks".into(),
        available: true,
        description: None,
    }
}

pub fn order(id: &str, table: u32, status: OrderStatus) -> Order {
    Order {
        id: id.into(),
        table_number: table,
        customer_phone: "+1555".into(),
        items: Vec::new(),
        status,
        total: 240.0,
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
    }
}

pub fn bill(id: &str, table: u32) -> Bill {
    Bill {
        id: id.into(),
        table_number: table,
        customer_phones: vec!["+1555".into()],
        order_ids: vec!["o1".into()],
        total: 240.0,
        status: BillStatus::Unpaid,
        payment_method: None,
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap(),
        paid_at: None,
    }
}

pub fn transaction(id: &str, bill_id: &str) -> Transaction {
    Transaction {
        id: id.into(),
        bill_id: bill_id.into(),
        table_number: 12,
        amount: 240.0,
        payment_method: PaymentMethod::Cash,
        paid_at: Utc.with_ymd_and_hms(2026, 3, 1, 13, 0, 0).unwrap(),
    }
}

pub fn settings(name: &str) -> Settings {
    Settings {
        restaurant_name: name.into(),
        table_count: 20,
        ..Settings::default()
    }
}

/// In-memory remote store for testing without HTTP.
///
/// Fetches snapshot the configured data when they start, then optionally
/// wait on a hold released by the test.
#[derive(Default)]
pub struct MockRemote {
    unhealthy: AtomicBool,
    data: Mutex<HashMap<Collection, CollectionData>>,
    failing: Mutex<HashSet<Collection>>,
    holds: Mutex<HashMap<Collection, VecDeque<oneshot::Receiver<()>>>>,
    fetches: Mutex<Vec<Collection>>,
    calls: Mutex<Vec<RemoteCall>>,
    call_error: Mutex<Option<RemoteError>>,
}

impl MockRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.unhealthy.store(!healthy, Ordering::SeqCst);
    }

    /// Set what the next fetches of this data's collection return.
    pub fn set_data(&self, data: CollectionData) {
        self.data.lock().unwrap().insert(data.collection(), data);
    }

    pub fn fail_fetch(&self, collection: Collection, fail: bool) {
        let mut failing = self.failing.lock().unwrap();
        if fail {
            failing.insert(collection);
        } else {
            failing.remove(&collection);
        }
    }

    /// Make the next fetch of `collection` wait until the sender fires
    /// (or is dropped).
    pub fn hold_next(&self, collection: Collection) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.holds
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn fail_calls(&self, error: RemoteError) {
        *self.call_error.lock().unwrap() = Some(error);
    }

    /// Every fetch started so far, in order.
    pub fn fetches(&self) -> Vec<Collection> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn fetch_count(&self, collection: Collection) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == collection)
            .count()
    }

    pub fn clear_fetches(&self) {
        self.fetches.lock().unwrap().clear();
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Yield until `n` fetches of `collection` have started.
    pub async fn wait_for_fetches(&self, collection: Collection, n: usize) {
        while self.fetch_count(collection) < n {
            tokio::task::yield_now().await;
        }
    }
}

impl RemoteApi for MockRemote {
    fn health(&self) -> RemoteFuture<'_, bool> {
        let healthy = !self.unhealthy.load(Ordering::SeqCst);
        Box::pin(async move { healthy })
    }

    fn fetch(&self, collection: Collection) -> RemoteFuture<'_, RemoteResult<CollectionData>> {
        Box::pin(async move {
            self.fetches.lock().unwrap().push(collection);
            let fails = self.failing.lock().unwrap().contains(&collection);
            let data = self
                .data
                .lock()
                .unwrap()
                .get(&collection)
                .cloned()
                .unwrap_or_else(|| CollectionData::empty(collection));
            let hold = self
                .holds
                .lock()
                .unwrap()
                .get_mut(&collection)
                .and_then(VecDeque::pop_front);
            if let Some(rx) = hold {
                let _ = rx.await;
            }
            if fails {
                Err(RemoteError::Status {
                    status: 500,
                    body: format!("{} unavailable", collection),
                })
            } else {
                Ok(data)
            }
        })
    }

    fn call(&self, call: RemoteCall) -> RemoteFuture<'_, RemoteResult<()>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(call);
            match self.call_error.lock().unwrap().clone() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        })
    }
}

/// Mock event channel for testing without real sockets.
pub struct MockChannel {
    connected: bool,
    /// Events that will be returned by recv().
    incoming: Arc<Mutex<VecDeque<SyncEvent>>>,
    connect_should_fail: Arc<AtomicBool>,
    connects: Arc<Mutex<Vec<String>>>,
    /// When set, an empty queue blocks recv() instead of closing.
    hold_open: Arc<AtomicBool>,
    closes: Arc<AtomicUsize>,
}

impl MockChannel {
    pub fn new() -> Self {
        MockChannel {
            connected: false,
            incoming: Arc::new(Mutex::new(VecDeque::new())),
            connect_should_fail: Arc::new(AtomicBool::new(false)),
            connects: Arc::new(Mutex::new(Vec::new())),
            hold_open: Arc::new(AtomicBool::new(false)),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A handle that stays usable after the channel moves into an engine.
    pub fn handle(&self) -> MockChannelHandle {
        MockChannelHandle {
            incoming: Arc::clone(&self.incoming),
            connect_should_fail: Arc::clone(&self.connect_should_fail),
            connects: Arc::clone(&self.connects),
            hold_open: Arc::clone(&self.hold_open),
            closes: Arc::clone(&self.closes),
        }
    }
}

#[derive(Clone)]
pub struct MockChannelHandle {
    incoming: Arc<Mutex<VecDeque<SyncEvent>>>,
    connect_should_fail: Arc<AtomicBool>,
    connects: Arc<Mutex<Vec<String>>>,
    hold_open: Arc<AtomicBool>,
    closes: Arc<AtomicUsize>,
}

impl MockChannelHandle {
    /// Add an event that will be returned by recv().
    pub fn queue_incoming(&self, event: SyncEvent) {
        self.incoming.lock().unwrap().push_back(event);
    }

    pub fn set_connect_fail(&self, fail: bool) {
        self.connect_should_fail.store(fail, Ordering::SeqCst);
    }

    /// Keep the socket open once the queue drains; recv() then waits forever.
    pub fn hold_open(&self) {
        self.hold_open.store(true, Ordering::SeqCst);
    }

    /// Close the socket on the next recv() that finds the queue empty,
    /// even while held open.
    pub fn close_once(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }

    /// URLs of every successful connect.
    pub fn connects(&self) -> Vec<String> {
        self.connects.lock().unwrap().clone()
    }
}

impl EventChannel for MockChannel {
    fn connect(
        &mut self,
        url: &str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = TransportResult<()>> + Send + '_>> {
        let url = url.to_string();
        Box::pin(async move {
            if self.connect_should_fail.load(Ordering::SeqCst) {
                Err(TransportError::ConnectionFailed("mock failure".into()))
            } else {
                self.connected = true;
                self.connects.lock().unwrap().push(url);
                Ok(())
            }
        })
    }

    fn disconnect(
        &mut self,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = TransportResult<()>> + Send + '_>> {
        Box::pin(async move {
            self.connected = false;
            Ok(())
        })
    }

    fn recv(
        &mut self,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = TransportResult<Option<SyncEvent>>> + Send + '_>,
    > {
        let incoming = Arc::clone(&self.incoming);
        Box::pin(async move {
            if !self.connected {
                return Err(TransportError::ConnectionClosed);
            }
            let next = incoming.lock().unwrap().pop_front();
            if next.is_none() {
                let close_requested = self
                    .closes
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                    .is_ok();
                if self.hold_open.load(Ordering::SeqCst) && !close_requested {
                    std::future::pending::<()>().await;
                }
                // Queue drained: behave like the remote closing the socket
                self.connected = false;
            }
            Ok(next)
        })
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
