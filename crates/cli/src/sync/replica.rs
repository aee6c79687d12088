// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory replica of the domain collections.
//!
//! The replica is written in exactly two ways: wholesale replacement of a
//! collection from a fetch ([`Replica::apply_fetch`]) and local application
//! of a mutation intent ([`Replica::apply_local`]). Readers get shared access
//! through [`ReplicaHandle::read`].
//!
//! Every fetch is stamped with a per-collection sequence number when it is
//! issued. A response whose sequence is not newer than the last one applied
//! for that collection is discarded, so a slow, superseded fetch can never
//! overwrite a fresher one.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use ts_core::{
    Action, Bill, BillStatus, Collection, CollectionData, Customer, Expense, MenuItem, Order,
    Settings, StaffMember, Transaction, WaiterCall, WaiterCallStatus,
};

const N: usize = Collection::ALL.len();

/// The replicated application state.
#[derive(Debug, Default)]
pub struct Replica {
    menu_items: Vec<MenuItem>,
    orders: Vec<Order>,
    bills: Vec<Bill>,
    customers: Vec<Customer>,
    staff: Vec<StaffMember>,
    settings: Settings,
    expenses: Vec<Expense>,
    waiter_calls: Vec<WaiterCall>,
    transactions: Vec<Transaction>,
    /// Last sequence number handed out per collection.
    issued: [u64; N],
    /// Sequence number of the fetch currently reflected per collection.
    applied: [u64; N],
    refreshed_at: [Option<DateTime<Utc>>; N],
}

impl Replica {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn menu_items(&self) -> &[MenuItem] {
        &self.menu_items
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn waiter_calls(&self) -> &[WaiterCall] {
        &self.waiter_calls
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of records held for `collection`.
    pub fn count(&self, collection: Collection) -> usize {
        match collection {
            Collection::MenuItems => self.menu_items.len(),
            Collection::Orders => self.orders.len(),
            Collection::Bills => self.bills.len(),
            Collection::Customers => self.customers.len(),
            Collection::Staff => self.staff.len(),
            Collection::Settings => 1,
            Collection::Expenses => self.expenses.len(),
            Collection::WaiterCalls => self.waiter_calls.len(),
            Collection::Transactions => self.transactions.len(),
        }
    }

    /// When `collection` was last replaced from a fetch.
    pub fn refreshed_at(&self, collection: Collection) -> Option<DateTime<Utc>> {
        self.refreshed_at[collection.index()]
    }

    /// Stamp a new fetch of `collection` and return its sequence number.
    pub(crate) fn begin_fetch(&mut self, collection: Collection) -> u64 {
        let slot = &mut self.issued[collection.index()];
        *slot += 1;
        *slot
    }

    /// Replace a collection with fetched data.
    ///
    /// Returns false (and leaves the replica untouched) if a newer fetch of
    /// the same collection has already been applied.
    pub(crate) fn apply_fetch(&mut self, seq: u64, data: CollectionData) -> bool {
        let i = data.collection().index();
        if seq <= self.applied[i] {
            return false;
        }
        self.applied[i] = seq;
        self.refreshed_at[i] = Some(Utc::now());
        match data {
            CollectionData::MenuItems(v) => self.menu_items = v,
            CollectionData::Orders(v) => self.orders = v,
            CollectionData::Bills(v) => self.bills = v,
            CollectionData::Customers(v) => self.customers = v,
            CollectionData::Staff(v) => self.staff = v,
            CollectionData::Settings(Some(s)) => self.settings = s,
            CollectionData::Settings(None) => {}
            CollectionData::Expenses(v) => self.expenses = v,
            CollectionData::WaiterCalls(v) => self.waiter_calls = v,
            CollectionData::Transactions(v) => self.transactions = v,
        }
        true
    }

    /// Apply a mutation intent to local state.
    ///
    /// Updates and deletes of records that do not exist are no-ops.
    pub(crate) fn apply_local(&mut self, action: &Action) {
        match action {
            Action::AddMenuItem(item) => self.menu_items.push(item.clone()),
            Action::UpdateMenuItem(item) => replace_by(&mut self.menu_items, item, |m| &m.id),
            Action::DeleteMenuItem { id } => self.menu_items.retain(|m| m.id != *id),
            Action::AddOrder(order) => self.orders.push(order.clone()),
            Action::UpdateOrderStatus { id, status } => {
                if let Some(order) = self.orders.iter_mut().find(|o| o.id == *id) {
                    order.status = *status;
                }
            }
            Action::CreateBill(bill) => self.bills.push(bill.clone()),
            Action::PayBill { id, payment_method } => {
                if let Some(bill) = self.bills.iter_mut().find(|b| b.id == *id) {
                    bill.status = BillStatus::Paid;
                    bill.payment_method = Some(*payment_method);
                    bill.paid_at = Some(Utc::now());
                }
            }
            Action::CallWaiter(call) => self.waiter_calls.push(call.clone()),
            Action::AcknowledgeWaiterCall { id } => {
                self.set_waiter_call_status(id, WaiterCallStatus::Acknowledged)
            }
            Action::DismissWaiterCall { id } => {
                self.set_waiter_call_status(id, WaiterCallStatus::Dismissed)
            }
            Action::AddExpense(expense) => self.expenses.push(expense.clone()),
            Action::DeleteExpense { id } => self.expenses.retain(|e| e.id != *id),
            Action::UpdateSettings(settings) => self.settings = settings.clone(),
            Action::AddStaff(member) => self.staff.push(member.clone()),
            Action::UpdateStaff(member) => replace_by(&mut self.staff, member, |s| &s.id),
            Action::DeleteStaff { id } => self.staff.retain(|s| s.id != *id),
            Action::UpsertCustomer(customer) => {
                match self.customers.iter_mut().find(|c| c.phone == customer.phone) {
                    Some(existing) => *existing = customer.clone(),
                    None => self.customers.push(customer.clone()),
                }
            }
        }
    }

    fn set_waiter_call_status(&mut self, id: &str, status: WaiterCallStatus) {
        if let Some(call) = self.waiter_calls.iter_mut().find(|c| c.id == id) {
            call.status = status;
        }
    }
}

fn replace_by<T: Clone>(items: &mut [T], new: &T, key: impl Fn(&T) -> &String) {
    if let Some(slot) = items.iter_mut().find(|i| key(&**i) == key(new)) {
        *slot = new.clone();
    }
}

/// Shared handle to the replica.
#[derive(Debug, Clone, Default)]
pub struct ReplicaHandle {
    inner: Arc<RwLock<Replica>>,
}

impl ReplicaHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared read access. Never hold the guard across an await point.
    pub fn read(&self) -> RwLockReadGuard<'_, Replica> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Replica> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "replica_tests.rs"]
mod tests;
