// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::sync::test_helpers::{bill, menu_item, order, settings};
use ts_core::{OrderStatus, PaymentMethod};

#[test]
fn test_apply_fetch_replaces_collection() {
    let mut replica = Replica::new();
    let seq = replica.begin_fetch(Collection::MenuItems);
    assert!(replica.apply_fetch(
        seq,
        CollectionData::MenuItems(vec![menu_item("m1", "Momo"), menu_item("m2", "Chowmein")])
    ));
    assert_eq!(replica.count(Collection::MenuItems), 2);
    assert!(replica.refreshed_at(Collection::MenuItems).is_some());
    assert!(replica.refreshed_at(Collection::Orders).is_none());
}

#[test]
fn test_older_fetch_is_discarded() {
    let mut replica = Replica::new();
    let first = replica.begin_fetch(Collection::Orders);
    let second = replica.begin_fetch(Collection::Orders);

    assert!(replica.apply_fetch(
        second,
        CollectionData::Orders(vec![order("new", 1, OrderStatus::Ready)])
    ));
    assert!(!replica.apply_fetch(
        first,
        CollectionData::Orders(vec![order("old", 1, OrderStatus::Pending)])
    ));
    assert_eq!(replica.orders()[0].id, "new");
}

#[test]
fn test_sequences_are_per_collection() {
    let mut replica = Replica::new();
    let bills = replica.begin_fetch(Collection::Bills);
    let _ = replica.begin_fetch(Collection::Orders);
    let _ = replica.begin_fetch(Collection::Orders);
    assert!(replica.apply_fetch(bills, CollectionData::Bills(vec![bill("b1", 3)])));
}

#[test]
fn test_missing_settings_keeps_current() {
    let mut replica = Replica::new();
    let seq = replica.begin_fetch(Collection::Settings);
    replica.apply_fetch(seq, CollectionData::Settings(Some(settings("Chiya Corner"))));

    let seq = replica.begin_fetch(Collection::Settings);
    assert!(replica.apply_fetch(seq, CollectionData::Settings(None)));
    assert_eq!(replica.settings().restaurant_name, "Chiya Corner");
}

#[test]
fn test_apply_local_pay_bill() {
    let mut replica = Replica::new();
    replica.apply_local(&Action::CreateBill(bill("b1", 12)));
    replica.apply_local(&Action::PayBill {
        id: "b1".into(),
        payment_method: PaymentMethod::Card,
    });

    let paid = &replica.bills()[0];
    assert_eq!(paid.status, BillStatus::Paid);
    assert_eq!(paid.payment_method, Some(PaymentMethod::Card));
    assert!(paid.paid_at.is_some());
}

#[test]
fn test_apply_local_updates_and_deletes() {
    let mut replica = Replica::new();
    replica.apply_local(&Action::AddMenuItem(menu_item("m1", "Momo")));
    replica.apply_local(&Action::AddMenuItem(menu_item("m2", "Thukpa")));
    replica.apply_local(&Action::UpdateMenuItem(menu_item("m1", "Jhol Momo")));
    replica.apply_local(&Action::DeleteMenuItem { id: "m2".into() });

    assert_eq!(replica.menu_items().len(), 1);
    assert_eq!(replica.menu_items()[0].name, "Jhol Momo");

    replica.apply_local(&Action::AddOrder(order("o1", 4, OrderStatus::Pending)));
    replica.apply_local(&Action::UpdateOrderStatus {
        id: "o1".into(),
        status: OrderStatus::Preparing,
    });
    assert_eq!(replica.orders()[0].status, OrderStatus::Preparing);
}

#[test]
fn test_apply_local_missing_record_is_noop() {
    let mut replica = Replica::new();
    replica.apply_local(&Action::UpdateMenuItem(menu_item("ghost", "Ghost")));
    replica.apply_local(&Action::AcknowledgeWaiterCall { id: "ghost".into() });
    assert!(replica.menu_items().is_empty());
    assert!(replica.waiter_calls().is_empty());
}

#[test]
fn test_upsert_customer_by_phone() {
    let mut replica = Replica::new();
    let mut customer = Customer {
        phone: "+1555".into(),
        name: None,
        total_orders: 1,
        total_spent: 100.0,
        last_visit: None,
    };
    replica.apply_local(&Action::UpsertCustomer(customer.clone()));
    customer.total_orders = 2;
    replica.apply_local(&Action::UpsertCustomer(customer));

    assert_eq!(replica.customers().len(), 1);
    assert_eq!(replica.customers()[0].total_orders, 2);
}

#[test]
fn test_handle_shares_state() {
    let handle = ReplicaHandle::new();
    let other = handle.clone();
    other
        .write()
        .apply_local(&Action::AddStaff(StaffMember {
            id: "s1".into(),
            name: "Sita".into(),
            role: "waiter".into(),
            active: true,
        }));
    assert_eq!(handle.read().staff().len(), 1);
}
