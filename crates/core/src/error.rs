// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for ts-core operations.

use thiserror::Error;

/// All possible errors that can occur in ts-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid collection: '{0}'\n  hint: valid collections are: menu_items, orders, bills, customers, staff, settings, expenses, waiter_calls, transactions")]
    InvalidCollection(String),

    #[error("invalid order status: '{0}'\n  hint: valid statuses are: pending, accepted, preparing, ready, served, cancelled")]
    InvalidOrderStatus(String),

    #[error("invalid payment method: '{0}'\n  hint: valid methods are: cash, card, fonepay")]
    InvalidPaymentMethod(String),

    #[error("invalid session reason: '{0}'")]
    InvalidSessionReason(String),

    #[error("invalid payload for '{action}': {source}")]
    InvalidPayload {
        action: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for ts-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
