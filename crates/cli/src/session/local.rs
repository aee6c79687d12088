// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Device-local session state.
//!
//! Two records live in durable storage: the list of tokens closed on this
//! device and a pointer to the session the device is ordering under. Both
//! are read-modify-write without transactions; corrupt values read as
//! absent.

use std::sync::Arc;

use ts_core::CurrentSession;

use crate::kv::{keys, read_json, write_json, KvStore, StoreResult};

/// Closed tokens kept before the oldest are evicted.
pub const MAX_CLOSED_SESSIONS: usize = 100;

#[derive(Clone)]
pub struct LocalSessions {
    store: Arc<dyn KvStore>,
}

impl LocalSessions {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        LocalSessions { store }
    }

    /// Closed tokens, oldest first.
    pub fn closed_sessions(&self) -> Vec<String> {
        read_json(self.store.as_ref(), keys::CLOSED_SESSIONS).unwrap_or_default()
    }

    /// Record `token` as closed. Already-recorded tokens are left in place.
    pub fn add_closed_session(&self, token: &str) -> StoreResult<()> {
        let mut closed = self.closed_sessions();
        if closed.iter().any(|t| t == token) {
            return Ok(());
        }
        closed.push(token.to_string());
        if closed.len() > MAX_CLOSED_SESSIONS {
            let excess = closed.len() - MAX_CLOSED_SESSIONS;
            closed.drain(..excess);
        }
        write_json(self.store.as_ref(), keys::CLOSED_SESSIONS, &closed)
    }

    pub fn is_session_closed(&self, token: &str) -> bool {
        self.closed_sessions().iter().any(|t| t == token)
    }

    pub fn current_session(&self) -> Option<CurrentSession> {
        read_json(self.store.as_ref(), keys::CURRENT_SESSION)
    }

    pub fn set_current_session(&self, session: &CurrentSession) -> StoreResult<()> {
        write_json(self.store.as_ref(), keys::CURRENT_SESSION, session)
    }

    pub fn clear_current_session(&self) -> StoreResult<()> {
        self.store.remove(keys::CURRENT_SESSION)
    }

    /// Token of the current session, if one is recorded.
    pub fn current_session_token(&self) -> Option<String> {
        self.current_session()
            .and_then(|s| s.token().map(str::to_string))
    }

    /// Close the current session if it belongs to `table` and one of
    /// `phones`: its token joins the closed list and the pointer is
    /// cleared.
    ///
    /// Returns true if a session was closed. Storage failures are logged
    /// and read as false.
    pub fn close_table_session(&self, table: u32, phones: &[String]) -> bool {
        let Some(current) = self.current_session() else {
            return false;
        };
        if !current.matches(table, phones) {
            return false;
        }

        let result = self
            .add_closed_session(&current.session_token)
            .and_then(|()| self.clear_current_session());
        match result {
            Ok(()) => {
                tracing::info!(table, "closed local session");
                true
            }
            Err(e) => {
                tracing::warn!(table, error = %e, "failed to close local session");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
