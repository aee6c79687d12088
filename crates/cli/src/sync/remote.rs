// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The remote operation surface.
//!
//! One fetch per collection, one health check, and a closed set of mutating
//! calls. The trait keeps the HTTP client out of the engine so tests can
//! substitute an in-memory remote.

use std::future::Future;
use std::pin::Pin;

use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode, NON_ALPHANUMERIC};
use serde_json::{json, Value};
use ts_core::{Action, Collection, CollectionData, OrderStatus, PaymentMethod};

/// Boxed future returned by remote operations.
pub type RemoteFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error type for remote operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    /// The request could not be sent or no response arrived.
    #[error("request failed: {0}")]
    Request(String),

    /// The remote answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Bytes escaped when an id lands in a path segment. Only RFC 3986
/// unreserved characters pass through.
const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn segment(id: &str) -> PercentEncode<'_> {
    utf8_percent_encode(id, ID_SEGMENT)
}

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// HTTP verb of a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// A single mutating call against the remote store.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    Create { collection: Collection, body: Value },
    Update { collection: Collection, id: String, body: Value },
    Delete { collection: Collection, id: String },
    UpdateOrderStatus { id: String, status: OrderStatus },
    PayBill { id: String, payment_method: PaymentMethod },
    AcknowledgeWaiterCall { id: String },
    DismissWaiterCall { id: String },
    UpsertCustomer { body: Value },
    UpdateSettings { body: Value },
}

impl RemoteCall {
    /// The single remote call that mirrors `action`.
    pub fn for_action(action: &Action) -> serde_json::Result<Self> {
        let call = match action {
            Action::AddMenuItem(item) => RemoteCall::Create {
                collection: Collection::MenuItems,
                body: serde_json::to_value(item)?,
            },
            Action::UpdateMenuItem(item) => RemoteCall::Update {
                collection: Collection::MenuItems,
                id: item.id.clone(),
                body: serde_json::to_value(item)?,
            },
            Action::DeleteMenuItem { id } => RemoteCall::Delete {
                collection: Collection::MenuItems,
                id: id.clone(),
            },
            Action::AddOrder(order) => RemoteCall::Create {
                collection: Collection::Orders,
                body: serde_json::to_value(order)?,
            },
            Action::UpdateOrderStatus { id, status } => RemoteCall::UpdateOrderStatus {
                id: id.clone(),
                status: *status,
            },
            Action::CreateBill(bill) => RemoteCall::Create {
                collection: Collection::Bills,
                body: serde_json::to_value(bill)?,
            },
            Action::PayBill { id, payment_method } => RemoteCall::PayBill {
                id: id.clone(),
                payment_method: *payment_method,
            },
            Action::CallWaiter(call) => RemoteCall::Create {
                collection: Collection::WaiterCalls,
                body: serde_json::to_value(call)?,
            },
            Action::AcknowledgeWaiterCall { id } => {
                RemoteCall::AcknowledgeWaiterCall { id: id.clone() }
            }
            Action::DismissWaiterCall { id } => RemoteCall::DismissWaiterCall { id: id.clone() },
            Action::AddExpense(expense) => RemoteCall::Create {
                collection: Collection::Expenses,
                body: serde_json::to_value(expense)?,
            },
            Action::DeleteExpense { id } => RemoteCall::Delete {
                collection: Collection::Expenses,
                id: id.clone(),
            },
            Action::UpdateSettings(settings) => RemoteCall::UpdateSettings {
                body: serde_json::to_value(settings)?,
            },
            Action::AddStaff(member) => RemoteCall::Create {
                collection: Collection::Staff,
                body: serde_json::to_value(member)?,
            },
            Action::UpdateStaff(member) => RemoteCall::Update {
                collection: Collection::Staff,
                id: member.id.clone(),
                body: serde_json::to_value(member)?,
            },
            Action::DeleteStaff { id } => RemoteCall::Delete {
                collection: Collection::Staff,
                id: id.clone(),
            },
            Action::UpsertCustomer(customer) => RemoteCall::UpsertCustomer {
                body: serde_json::to_value(customer)?,
            },
        };
        Ok(call)
    }

    /// HTTP verb, path (relative to the API base) and body for this call.
    ///
    /// Ids are percent-encoded so each stays a single path segment.
    pub fn route(&self) -> (Method, String, Option<Value>) {
        match self {
            RemoteCall::Create { collection, body } => {
                (Method::Post, collection_path(*collection).to_string(), Some(body.clone()))
            }
            RemoteCall::Update {
                collection,
                id,
                body,
            } => (
                Method::Put,
                format!("{}/{}", collection_path(*collection), segment(id)),
                Some(body.clone()),
            ),
            RemoteCall::Delete { collection, id } => (
                Method::Delete,
                format!("{}/{}", collection_path(*collection), segment(id)),
                None,
            ),
            RemoteCall::UpdateOrderStatus { id, status } => (
                Method::Patch,
                format!("/orders/{}/status", segment(id)),
                Some(json!({ "status": status })),
            ),
            RemoteCall::PayBill { id, payment_method } => (
                Method::Post,
                format!("/bills/{}/pay", segment(id)),
                Some(json!({ "paymentMethod": payment_method })),
            ),
            RemoteCall::AcknowledgeWaiterCall { id } => (
                Method::Post,
                format!("/waiter-calls/{}/acknowledge", segment(id)),
                None,
            ),
            RemoteCall::DismissWaiterCall { id } => {
                (Method::Post, format!("/waiter-calls/{}/dismiss", segment(id)), None)
            }
            RemoteCall::UpsertCustomer { body } => {
                (Method::Post, "/customers/upsert".to_string(), Some(body.clone()))
            }
            RemoteCall::UpdateSettings { body } => {
                (Method::Put, "/settings".to_string(), Some(body.clone()))
            }
        }
    }
}

/// REST path of a collection, relative to the API base.
pub fn collection_path(collection: Collection) -> &'static str {
    match collection {
        Collection::MenuItems => "/menu",
        Collection::Orders => "/orders",
        Collection::Bills => "/bills",
        Collection::Customers => "/customers",
        Collection::Staff => "/staff",
        Collection::Settings => "/settings",
        Collection::Expenses => "/expenses",
        Collection::WaiterCalls => "/waiter-calls",
        Collection::Transactions => "/transactions",
    }
}

/// The remote store, as seen by the sync engine and the forwarder.
pub trait RemoteApi: Send + Sync {
    /// Check the remote is up. Any failure reads as unhealthy.
    fn health(&self) -> RemoteFuture<'_, bool>;

    /// Fetch the full contents of a collection.
    fn fetch(&self, collection: Collection) -> RemoteFuture<'_, RemoteResult<CollectionData>>;

    /// Perform one mutating call.
    fn call(&self, call: RemoteCall) -> RemoteFuture<'_, RemoteResult<()>>;
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
