// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    connected = { r#"{"type":"connection","status":"connected"}"#, SyncEvent::connected() },
    disconnected = { r#"{"type":"connection","status":"disconnected"}"#, SyncEvent::disconnected() },
    menu = { r#"{"type":"MENU_UPDATE"}"#, SyncEvent::MenuUpdate },
    order_with_data = { r#"{"type":"ORDER_UPDATE","data":{"id":"o1"}}"#, SyncEvent::OrderUpdate },
    bill = { r#"{"type":"BILL_UPDATE"}"#, SyncEvent::BillUpdate },
    customer = { r#"{"type":"CUSTOMER_UPDATE"}"#, SyncEvent::CustomerUpdate },
    waiter = { r#"{"type":"WAITER_CALL_UPDATE"}"#, SyncEvent::WaiterCallUpdate },
)]
fn decode_known_events(json: &str, expected: SyncEvent) {
    assert_eq!(SyncEvent::from_json(json).unwrap(), Some(expected));
}

#[test]
fn unknown_event_type_decodes_to_none() {
    assert_eq!(
        SyncEvent::from_json(r#"{"type":"STAFF_UPDATE"}"#).unwrap(),
        None
    );
}

#[test]
fn malformed_frame_is_an_error() {
    assert!(SyncEvent::from_json("not json").is_err());
    assert!(SyncEvent::from_json(r#"{"status":"connected"}"#).is_err());
}

#[test]
fn encode_uses_wire_names() {
    assert_eq!(
        SyncEvent::BillUpdate.to_json().unwrap(),
        r#"{"type":"BILL_UPDATE"}"#
    );
    assert_eq!(
        SyncEvent::connected().to_json().unwrap(),
        r#"{"type":"connection","status":"connected"}"#
    );
}

#[parameterized(
    menu = { SyncEvent::MenuUpdate, &[Collection::MenuItems] },
    order = { SyncEvent::OrderUpdate, &[Collection::Orders] },
    bill = { SyncEvent::BillUpdate, &[Collection::Bills, Collection::Transactions] },
    customer = { SyncEvent::CustomerUpdate, &[Collection::Customers] },
    waiter = { SyncEvent::WaiterCallUpdate, &[Collection::WaiterCalls] },
    connection = { SyncEvent::connected(), &[] },
)]
fn refetch_mapping(event: SyncEvent, expected: &[Collection]) {
    assert_eq!(event.refetch_targets(), expected);
}

#[test]
fn every_update_kind_refetches_something() {
    for kind in EventKind::ALL {
        if kind == EventKind::Connection {
            continue;
        }
        let targets = kind.refetch_targets();
        assert!(!targets.is_empty(), "{} has no refetch targets", kind);
        assert!(targets.len() <= 2);
    }
}
