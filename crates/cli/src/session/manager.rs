// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session lifecycle manager.
//!
//! Wraps the session RPCs so that callers on the ordering path get a safe
//! default instead of an error: no session, an invalid validation, zero
//! sessions closed, or no active session. The local mirror is exposed
//! alongside.

use std::sync::Arc;

use chrono::Utc;
use ts_core::{staleness_window, CurrentSession, SessionValidation, TableSession};

use super::local::LocalSessions;
use super::rpc::SessionRpc;
use crate::kv::StoreResult;
use crate::sync::RemoteResult;

pub struct SessionManager {
    rpc: Arc<dyn SessionRpc>,
    local: LocalSessions,
}

impl SessionManager {
    pub fn new(rpc: Arc<dyn SessionRpc>, local: LocalSessions) -> Self {
        SessionManager { rpc, local }
    }

    pub fn local(&self) -> &LocalSessions {
        &self.local
    }

    /// Get the active session for table and phone, creating it if needed.
    ///
    /// Returns `None` if the remote call fails.
    pub async fn get_or_create_session(
        &self,
        table: u32,
        phone: &str,
        token: &str,
    ) -> Option<TableSession> {
        match self
            .rpc
            .get_or_create_session(table, phone.to_string(), token.to_string())
            .await
        {
            Ok(session) => {
                tracing::debug!(table, session = %session.id, "session ready");
                Some(session)
            }
            Err(e) => {
                tracing::warn!(table, error = %e, "failed to create session");
                None
            }
        }
    }

    /// Validate a session token.
    ///
    /// A remote failure reads as invalid with the "try again" message; use
    /// [`try_validate_session`](Self::try_validate_session) to tell an outage
    /// apart from a real rejection.
    pub async fn validate_session(
        &self,
        table: u32,
        phone: &str,
        token: &str,
    ) -> SessionValidation {
        match self.try_validate_session(table, phone, token).await {
            Ok(validation) => validation,
            Err(e) => {
                tracing::warn!(table, error = %e, "session validation unavailable");
                SessionValidation::unavailable()
            }
        }
    }

    pub async fn try_validate_session(
        &self,
        table: u32,
        phone: &str,
        token: &str,
    ) -> RemoteResult<SessionValidation> {
        self.rpc
            .validate_session(table, phone.to_string(), token.to_string())
            .await
    }

    /// Close every active session at `table` for `phones`.
    ///
    /// Returns the number closed, 0 if the remote call fails.
    pub async fn close_table_sessions(&self, table: u32, phones: &[String]) -> u64 {
        match self.rpc.close_table_sessions(table, phones.to_vec()).await {
            Ok(closed) => {
                tracing::info!(table, closed, "closed table sessions");
                closed
            }
            Err(e) => {
                tracing::warn!(table, error = %e, "failed to close table sessions");
                0
            }
        }
    }

    /// Returns true if table and phone have an active session created
    /// inside the staleness window. False on any remote failure.
    pub async fn has_active_session(&self, table: u32, phone: &str) -> bool {
        let since = Utc::now() - staleness_window();
        match self
            .rpc
            .count_active_sessions(table, phone.to_string(), since)
            .await
        {
            Ok(count) => count > 0,
            Err(e) => {
                tracing::warn!(table, error = %e, "failed to check active session");
                false
            }
        }
    }

    /// Settle a table after its bill is paid: close the remote sessions,
    /// then the local mirror.
    ///
    /// Returns the remote count and whether the local pointer was closed.
    pub async fn settle_table(&self, table: u32, phones: &[String]) -> (u64, bool) {
        let closed = self.close_table_sessions(table, phones).await;
        let local = self.local.close_table_session(table, phones);
        (closed, local)
    }

    pub fn close_table_session(&self, table: u32, phones: &[String]) -> bool {
        self.local.close_table_session(table, phones)
    }

    pub fn is_session_closed(&self, token: &str) -> bool {
        self.local.is_session_closed(token)
    }

    pub fn current_session_token(&self) -> Option<String> {
        self.local.current_session_token()
    }

    pub fn set_current_session(&self, session: &CurrentSession) -> StoreResult<()> {
        self.local.set_current_session(session)
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
