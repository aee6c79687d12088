// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The nine replicated domain collections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::{
    Bill, Customer, Expense, MenuItem, Order, Settings, StaffMember, Transaction, WaiterCall,
};

/// Name of a replicated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    MenuItems,
    Orders,
    Bills,
    Customers,
    Staff,
    /// Singleton; fetched as one object rather than a list.
    Settings,
    Expenses,
    WaiterCalls,
    Transactions,
}

impl Collection {
    /// Every collection, in bootstrap order.
    pub const ALL: [Collection; 9] = [
        Collection::MenuItems,
        Collection::Orders,
        Collection::Bills,
        Collection::Customers,
        Collection::Staff,
        Collection::Settings,
        Collection::Expenses,
        Collection::WaiterCalls,
        Collection::Transactions,
    ];

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::MenuItems => "menu_items",
            Collection::Orders => "orders",
            Collection::Bills => "bills",
            Collection::Customers => "customers",
            Collection::Staff => "staff",
            Collection::Settings => "settings",
            Collection::Expenses => "expenses",
            Collection::WaiterCalls => "waiter_calls",
            Collection::Transactions => "transactions",
        }
    }

    /// Position in [`Collection::ALL`], usable as a dense array index.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_singleton(&self) -> bool {
        matches!(self, Collection::Settings)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Collection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.to_lowercase().replace('-', "_");
        Collection::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| Error::InvalidCollection(s.to_string()))
    }
}

/// The full contents of one collection as returned by a fetch.
///
/// A replica replaces a collection wholesale with one of these, so a
/// consumer never observes a half-written collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionData {
    MenuItems(Vec<MenuItem>),
    Orders(Vec<Order>),
    Bills(Vec<Bill>),
    Customers(Vec<Customer>),
    Staff(Vec<StaffMember>),
    /// `None` when the remote has no settings row yet; the replica keeps its
    /// current settings in that case.
    Settings(Option<Settings>),
    Expenses(Vec<Expense>),
    WaiterCalls(Vec<WaiterCall>),
    Transactions(Vec<Transaction>),
}

impl CollectionData {
    /// Which collection this data belongs to.
    pub fn collection(&self) -> Collection {
        match self {
            CollectionData::MenuItems(_) => Collection::MenuItems,
            CollectionData::Orders(_) => Collection::Orders,
            CollectionData::Bills(_) => Collection::Bills,
            CollectionData::Customers(_) => Collection::Customers,
            CollectionData::Staff(_) => Collection::Staff,
            CollectionData::Settings(_) => Collection::Settings,
            CollectionData::Expenses(_) => Collection::Expenses,
            CollectionData::WaiterCalls(_) => Collection::WaiterCalls,
            CollectionData::Transactions(_) => Collection::Transactions,
        }
    }

    /// Number of records (settings count as one when present).
    pub fn len(&self) -> usize {
        match self {
            CollectionData::MenuItems(v) => v.len(),
            CollectionData::Orders(v) => v.len(),
            CollectionData::Bills(v) => v.len(),
            CollectionData::Customers(v) => v.len(),
            CollectionData::Staff(v) => v.len(),
            CollectionData::Settings(s) => usize::from(s.is_some()),
            CollectionData::Expenses(v) => v.len(),
            CollectionData::WaiterCalls(v) => v.len(),
            CollectionData::Transactions(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode a fetch response body for `collection`.
    ///
    /// A JSON `null` body decodes to an empty collection (or absent settings).
    pub fn from_json(collection: Collection, body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        Self::from_value(collection, value)
    }

    /// Decode an already-parsed JSON value for `collection`.
    pub fn from_value(collection: Collection, value: serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::empty(collection));
        }
        let data = match collection {
            Collection::MenuItems => CollectionData::MenuItems(serde_json::from_value(value)?),
            Collection::Orders => CollectionData::Orders(serde_json::from_value(value)?),
            Collection::Bills => CollectionData::Bills(serde_json::from_value(value)?),
            Collection::Customers => CollectionData::Customers(serde_json::from_value(value)?),
            Collection::Staff => CollectionData::Staff(serde_json::from_value(value)?),
            Collection::Settings => CollectionData::Settings(Some(serde_json::from_value(value)?)),
            Collection::Expenses => CollectionData::Expenses(serde_json::from_value(value)?),
            Collection::WaiterCalls => CollectionData::WaiterCalls(serde_json::from_value(value)?),
            Collection::Transactions => {
                CollectionData::Transactions(serde_json::from_value(value)?)
            }
        };
        Ok(data)
    }

    /// An empty value for `collection`.
    pub fn empty(collection: Collection) -> Self {
        match collection {
            Collection::MenuItems => CollectionData::MenuItems(Vec::new()),
            Collection::Orders => CollectionData::Orders(Vec::new()),
            Collection::Bills => CollectionData::Bills(Vec::new()),
            Collection::Customers => CollectionData::Customers(Vec::new()),
            Collection::Staff => CollectionData::Staff(Vec::new()),
            Collection::Settings => CollectionData::Settings(None),
            Collection::Expenses => CollectionData::Expenses(Vec::new()),
            Collection::WaiterCalls => CollectionData::WaiterCalls(Vec::new()),
            Collection::Transactions => CollectionData::Transactions(Vec::new()),
        }
    }
}

#[cfg(test)]
#[path = "collection_tests.rs"]
mod tests;
