// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ts-core: Shared types for the tabsync client.
//!
//! This crate provides the domain records, collection names, channel events,
//! mutation intents and session types used by the sync engine and the
//! session manager. It performs no I/O.

pub mod action;
pub mod collection;
pub mod error;
pub mod event;
pub mod models;
pub mod session;

pub use action::Action;
pub use collection::{Collection, CollectionData};
pub use error::{Error, Result};
pub use event::{ConnectionStatus, EventKind, SyncEvent};
pub use models::{
    Bill, BillStatus, Customer, Expense, MenuItem, Order, OrderLine, OrderStatus, PaymentMethod,
    Settings, StaffMember, Transaction, WaiterCall, WaiterCallStatus,
};
pub use session::{
    staleness_window, CurrentSession, InvalidReason, SessionStatus, SessionValidation,
    TableSession, SESSION_STALENESS_HOURS, VALIDATION_UNAVAILABLE_MESSAGE,
};
