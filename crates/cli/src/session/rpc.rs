// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use ts_core::{SessionValidation, TableSession};

use crate::sync::{RemoteFuture, RemoteResult};

/// Session RPCs exposed by the remote authority.
///
/// Arguments are owned so implementations can move them into the request.
pub trait SessionRpc: Send + Sync {
    /// Return the active session for table and phone, creating it with
    /// `token` if none exists. Idempotent.
    fn get_or_create_session(
        &self,
        table: u32,
        phone: String,
        token: String,
    ) -> RemoteFuture<'_, RemoteResult<TableSession>>;

    fn validate_session(
        &self,
        table: u32,
        phone: String,
        token: String,
    ) -> RemoteFuture<'_, RemoteResult<SessionValidation>>;

    /// Close every active session at `table` for any of `phones`.
    /// Returns how many were closed.
    fn close_table_sessions(
        &self,
        table: u32,
        phones: Vec<String>,
    ) -> RemoteFuture<'_, RemoteResult<u64>>;

    /// Count active sessions for table and phone created strictly after
    /// `created_after`.
    fn count_active_sessions(
        &self,
        table: u32,
        phone: String,
        created_after: DateTime<Utc>,
    ) -> RemoteFuture<'_, RemoteResult<usize>>;
}
