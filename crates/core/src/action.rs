// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local mutation intents that are forwarded to the remote store.
//!
//! The taxonomy is closed: every mutation the application performs is one
//! of these variants. The string-keyed form (`"payBill"` plus a JSON payload)
//! is accepted through [`Action::from_named`] for callers that only have the
//! name.

use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::error::{Error, Result};
use crate::models::{
    Bill, Customer, Expense, MenuItem, Order, OrderStatus, PaymentMethod, Settings, StaffMember,
    WaiterCall,
};

/// A mutation the application has already applied locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "camelCase")]
pub enum Action {
    AddMenuItem(MenuItem),
    UpdateMenuItem(MenuItem),
    DeleteMenuItem {
        id: String,
    },
    AddOrder(Order),
    UpdateOrderStatus {
        id: String,
        status: OrderStatus,
    },
    CreateBill(Bill),
    PayBill {
        id: String,
        #[serde(rename = "paymentMethod")]
        payment_method: PaymentMethod,
    },
    CallWaiter(WaiterCall),
    AcknowledgeWaiterCall {
        id: String,
    },
    DismissWaiterCall {
        id: String,
    },
    AddExpense(Expense),
    DeleteExpense {
        id: String,
    },
    UpdateSettings(Settings),
    AddStaff(StaffMember),
    UpdateStaff(StaffMember),
    DeleteStaff {
        id: String,
    },
    #[serde(rename = "addOrUpdateCustomer")]
    UpsertCustomer(Customer),
}

impl Action {
    /// Every action name in the taxonomy.
    pub const NAMES: [&'static str; 17] = [
        "addMenuItem",
        "updateMenuItem",
        "deleteMenuItem",
        "addOrder",
        "updateOrderStatus",
        "createBill",
        "payBill",
        "callWaiter",
        "acknowledgeWaiterCall",
        "dismissWaiterCall",
        "addExpense",
        "deleteExpense",
        "updateSettings",
        "addStaff",
        "updateStaff",
        "deleteStaff",
        "addOrUpdateCustomer",
    ];

    /// The action's name in the string-keyed taxonomy.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddMenuItem(_) => "addMenuItem",
            Action::UpdateMenuItem(_) => "updateMenuItem",
            Action::DeleteMenuItem { .. } => "deleteMenuItem",
            Action::AddOrder(_) => "addOrder",
            Action::UpdateOrderStatus { .. } => "updateOrderStatus",
            Action::CreateBill(_) => "createBill",
            Action::PayBill { .. } => "payBill",
            Action::CallWaiter(_) => "callWaiter",
            Action::AcknowledgeWaiterCall { .. } => "acknowledgeWaiterCall",
            Action::DismissWaiterCall { .. } => "dismissWaiterCall",
            Action::AddExpense(_) => "addExpense",
            Action::DeleteExpense { .. } => "deleteExpense",
            Action::UpdateSettings(_) => "updateSettings",
            Action::AddStaff(_) => "addStaff",
            Action::UpdateStaff(_) => "updateStaff",
            Action::DeleteStaff { .. } => "deleteStaff",
            Action::UpsertCustomer(_) => "addOrUpdateCustomer",
        }
    }

    /// The collection this action mutates.
    pub fn collection(&self) -> Collection {
        match self {
            Action::AddMenuItem(_) | Action::UpdateMenuItem(_) | Action::DeleteMenuItem { .. } => {
                Collection::MenuItems
            }
            Action::AddOrder(_) | Action::UpdateOrderStatus { .. } => Collection::Orders,
            Action::CreateBill(_) | Action::PayBill { .. } => Collection::Bills,
            Action::CallWaiter(_)
            | Action::AcknowledgeWaiterCall { .. }
            | Action::DismissWaiterCall { .. } => Collection::WaiterCalls,
            Action::AddExpense(_) | Action::DeleteExpense { .. } => Collection::Expenses,
            Action::UpdateSettings(_) => Collection::Settings,
            Action::AddStaff(_) | Action::UpdateStaff(_) | Action::DeleteStaff { .. } => {
                Collection::Staff
            }
            Action::UpsertCustomer(_) => Collection::Customers,
        }
    }

    /// Build an action from its string name and JSON payload.
    ///
    /// Returns `Ok(None)` for names outside the taxonomy, and an error when
    /// the name is known but the payload does not fit it.
    pub fn from_named(name: &str, payload: serde_json::Value) -> Result<Option<Self>> {
        if !Self::NAMES.contains(&name) {
            return Ok(None);
        }
        let tagged = serde_json::json!({ "action": name, "payload": payload });
        serde_json::from_value(tagged)
            .map(Some)
            .map_err(|source| Error::InvalidPayload {
                action: name.to_string(),
                source,
            })
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
