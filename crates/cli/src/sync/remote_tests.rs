// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the remote call mapping.

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::json;
use ts_core::{Customer, MenuItem, Settings};
use yare::parameterized;

fn menu_item() -> MenuItem {
    MenuItem {
        id: "m1".into(),
        name: "Masala Tea".into(),
        price: 40.0,
        category: "drinks".into(),
        available: true,
        description: None,
    }
}

#[test]
fn test_add_menu_item_posts_to_collection() {
    let call = RemoteCall::for_action(&Action::AddMenuItem(menu_item())).unwrap();
    let (method, path, body) = call.route();
    assert_eq!(method, Method::Post);
    assert_eq!(path, "/menu");
    assert_eq!(body.unwrap()["name"], "Masala Tea");
}

#[test]
fn test_update_menu_item_puts_by_id() {
    let call = RemoteCall::for_action(&Action::UpdateMenuItem(menu_item())).unwrap();
    let (method, path, _) = call.route();
    assert_eq!(method, Method::Put);
    assert_eq!(path, "/menu/m1");
}

#[test]
fn test_pay_bill_carries_payment_method() {
    let call = RemoteCall::for_action(&Action::PayBill {
        id: "b7".into(),
        payment_method: PaymentMethod::Fonepay,
    })
    .unwrap();
    let (method, path, body) = call.route();
    assert_eq!(method, Method::Post);
    assert_eq!(path, "/bills/b7/pay");
    assert_eq!(body, Some(json!({"paymentMethod": "fonepay"})));
}

#[test]
fn test_update_order_status_patches() {
    let call = RemoteCall::for_action(&Action::UpdateOrderStatus {
        id: "o1".into(),
        status: OrderStatus::Served,
    })
    .unwrap();
    assert_eq!(
        call.route(),
        (
            Method::Patch,
            "/orders/o1/status".to_string(),
            Some(json!({"status": "served"}))
        )
    );
}

#[parameterized(
    delete_menu = { Action::DeleteMenuItem { id: "x".into() }, Method::Delete, "/menu/x" },
    delete_expense = { Action::DeleteExpense { id: "x".into() }, Method::Delete, "/expenses/x" },
    delete_staff = { Action::DeleteStaff { id: "x".into() }, Method::Delete, "/staff/x" },
    acknowledge = { Action::AcknowledgeWaiterCall { id: "x".into() }, Method::Post, "/waiter-calls/x/acknowledge" },
    dismiss = { Action::DismissWaiterCall { id: "x".into() }, Method::Post, "/waiter-calls/x/dismiss" },
    settings = { Action::UpdateSettings(Settings::default()), Method::Put, "/settings" },
    customer = { Action::UpsertCustomer(Customer { phone: "+1555".into(), name: None, total_orders: 0, total_spent: 0.0, last_visit: None }), Method::Post, "/customers/upsert" },
)]
fn test_action_routes(action: Action, method: Method, path: &str) {
    let (m, p, _) = RemoteCall::for_action(&action).unwrap().route();
    assert_eq!(m, method);
    assert_eq!(p, path);
}

#[parameterized(
    slash_and_query = { Action::DeleteExpense { id: "a/b?c".into() }, "/expenses/a%2Fb%3Fc" },
    fragment_and_space = { Action::DeleteStaff { id: "s 1#x".into() }, "/staff/s%201%23x" },
    dot_dot = { Action::DeleteMenuItem { id: "../settings".into() }, "/menu/..%2Fsettings" },
    nested_route = { Action::PayBill { id: "b/1".into(), payment_method: PaymentMethod::Cash }, "/bills/b%2F1/pay" },
    unicode = { Action::DismissWaiterCall { id: "टे".into() }, "/waiter-calls/%E0%A4%9F%E0%A5%87/dismiss" },
    unreserved_kept = { Action::AcknowledgeWaiterCall { id: "w-1_a.b~c".into() }, "/waiter-calls/w-1_a.b~c/acknowledge" },
)]
fn test_ids_stay_one_path_segment(action: Action, path: &str) {
    let (_, p, _) = RemoteCall::for_action(&action).unwrap().route();
    assert_eq!(p, path);
}

#[test]
fn test_every_collection_has_a_path() {
    for c in Collection::ALL {
        assert!(collection_path(c).starts_with('/'));
    }
}
