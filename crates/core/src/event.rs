// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Events delivered by the remote event channel.
//!
//! The channel sends JSON text frames tagged by `type`:
//!
//! ```text
//! {"type": "connection", "status": "connected"}
//! {"type": "BILL_UPDATE", "data": {...}}
//! ```
//!
//! Update events carry no payload this layer uses; they only say which part
//! of the remote changed. Unknown event types decode to `None` and are
//! ignored by consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::collection::Collection;
use crate::error::Result;

/// Lifecycle status carried by a `connection` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// Name of an event stream, used to route subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Connection,
    MenuUpdate,
    OrderUpdate,
    BillUpdate,
    CustomerUpdate,
    WaiterCallUpdate,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Connection,
        EventKind::MenuUpdate,
        EventKind::OrderUpdate,
        EventKind::BillUpdate,
        EventKind::CustomerUpdate,
        EventKind::WaiterCallUpdate,
    ];

    /// Wire name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Connection => "connection",
            EventKind::MenuUpdate => "MENU_UPDATE",
            EventKind::OrderUpdate => "ORDER_UPDATE",
            EventKind::BillUpdate => "BILL_UPDATE",
            EventKind::CustomerUpdate => "CUSTOMER_UPDATE",
            EventKind::WaiterCallUpdate => "WAITER_CALL_UPDATE",
        }
    }

    /// Collections to refetch when an event of this kind arrives.
    ///
    /// A bill settlement also writes a transaction, so bill updates refetch
    /// both.
    pub fn refetch_targets(&self) -> &'static [Collection] {
        match self {
            EventKind::Connection => &[],
            EventKind::MenuUpdate => &[Collection::MenuItems],
            EventKind::OrderUpdate => &[Collection::Orders],
            EventKind::BillUpdate => &[Collection::Bills, Collection::Transactions],
            EventKind::CustomerUpdate => &[Collection::Customers],
            EventKind::WaiterCallUpdate => &[Collection::WaiterCalls],
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An event received from the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SyncEvent {
    #[serde(rename = "connection")]
    Connection { status: ConnectionStatus },
    #[serde(rename = "MENU_UPDATE")]
    MenuUpdate,
    #[serde(rename = "ORDER_UPDATE")]
    OrderUpdate,
    #[serde(rename = "BILL_UPDATE")]
    BillUpdate,
    #[serde(rename = "CUSTOMER_UPDATE")]
    CustomerUpdate,
    #[serde(rename = "WAITER_CALL_UPDATE")]
    WaiterCallUpdate,
}

/// Wire form that tolerates event types this client does not know.
#[derive(Deserialize)]
#[serde(tag = "type")]
enum WireEvent {
    #[serde(rename = "connection")]
    Connection { status: ConnectionStatus },
    #[serde(rename = "MENU_UPDATE")]
    MenuUpdate,
    #[serde(rename = "ORDER_UPDATE")]
    OrderUpdate,
    #[serde(rename = "BILL_UPDATE")]
    BillUpdate,
    #[serde(rename = "CUSTOMER_UPDATE")]
    CustomerUpdate,
    #[serde(rename = "WAITER_CALL_UPDATE")]
    WaiterCallUpdate,
    #[serde(other)]
    Unknown,
}

impl SyncEvent {
    pub fn connected() -> Self {
        SyncEvent::Connection {
            status: ConnectionStatus::Connected,
        }
    }

    pub fn disconnected() -> Self {
        SyncEvent::Connection {
            status: ConnectionStatus::Disconnected,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            SyncEvent::Connection { .. } => EventKind::Connection,
            SyncEvent::MenuUpdate => EventKind::MenuUpdate,
            SyncEvent::OrderUpdate => EventKind::OrderUpdate,
            SyncEvent::BillUpdate => EventKind::BillUpdate,
            SyncEvent::CustomerUpdate => EventKind::CustomerUpdate,
            SyncEvent::WaiterCallUpdate => EventKind::WaiterCallUpdate,
        }
    }

    /// Collections to refetch in response to this event.
    pub fn refetch_targets(&self) -> &'static [Collection] {
        self.kind().refetch_targets()
    }

    /// Serialize to a JSON frame.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON frame. Unknown event types yield `Ok(None)`.
    pub fn from_json(json: &str) -> Result<Option<Self>> {
        let wire: WireEvent = serde_json::from_str(json)?;
        Ok(match wire {
            WireEvent::Connection { status } => Some(SyncEvent::Connection { status }),
            WireEvent::MenuUpdate => Some(SyncEvent::MenuUpdate),
            WireEvent::OrderUpdate => Some(SyncEvent::OrderUpdate),
            WireEvent::BillUpdate => Some(SyncEvent::BillUpdate),
            WireEvent::CustomerUpdate => Some(SyncEvent::CustomerUpdate),
            WireEvent::WaiterCallUpdate => Some(SyncEvent::WaiterCallUpdate),
            WireEvent::Unknown => None,
        })
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
