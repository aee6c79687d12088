// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Anonymous per-table ordering sessions.
//!
//! The remote authority owns sessions; [`SessionManager`] wraps its RPCs
//! with safe defaults. [`LocalSessions`] mirrors closures on this device so
//! a settled table's ordering link cannot be replayed from local state.

mod local;
mod manager;
mod rpc;
mod token;

pub use local::{LocalSessions, MAX_CLOSED_SESSIONS};
pub use manager::SessionManager;
pub use rpc::SessionRpc;
pub use token::generate_session_token;

#[cfg(test)]
pub(crate) mod test_helpers;
