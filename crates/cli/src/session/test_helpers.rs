// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory session authority for tests.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use ts_core::{InvalidReason, SessionStatus, SessionValidation, TableSession};

use super::rpc::SessionRpc;
use crate::sync::{RemoteError, RemoteFuture, RemoteResult};

/// Behaves like the remote session functions, backed by a vector.
#[derive(Default)]
pub struct MockSessionRpc {
    sessions: Mutex<Vec<TableSession>>,
    failing: AtomicBool,
    next_id: AtomicU64,
}

impl MockSessionRpc {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Move every session's creation time back by `by`.
    pub fn age_sessions(&self, by: Duration) {
        for s in self.sessions.lock().unwrap().iter_mut() {
            s.created_at -= by;
        }
    }

    pub fn sessions(&self) -> Vec<TableSession> {
        self.sessions.lock().unwrap().clone()
    }

    fn check(&self) -> RemoteResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RemoteError::Request("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

impl SessionRpc for MockSessionRpc {
    fn get_or_create_session(
        &self,
        table: u32,
        phone: String,
        token: String,
    ) -> RemoteFuture<'_, RemoteResult<TableSession>> {
        Box::pin(async move {
            self.check()?;
            let now = Utc::now();
            let mut sessions = self.sessions.lock().unwrap();
            if let Some(existing) = sessions.iter().find(|s| {
                s.table_number == table && s.customer_phone == phone && s.is_usable_at(now)
            }) {
                return Ok(existing.clone());
            }
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let session = TableSession {
                id: format!("sess-{}", id),
                table_number: table,
                customer_phone: phone,
                session_token: token,
                status: SessionStatus::Active,
                created_at: now,
                closed_at: None,
            };
            sessions.push(session.clone());
            Ok(session)
        })
    }

    fn validate_session(
        &self,
        table: u32,
        phone: String,
        token: String,
    ) -> RemoteFuture<'_, RemoteResult<SessionValidation>> {
        Box::pin(async move {
            self.check()?;
            let sessions = self.sessions.lock().unwrap();
            let Some(session) = sessions.iter().find(|s| s.session_token == token) else {
                return Ok(SessionValidation::invalid(InvalidReason::SessionNotFound));
            };
            let validation = if session.status == SessionStatus::Closed {
                SessionValidation::invalid(InvalidReason::SessionClosed)
            } else if session.is_stale_at(Utc::now()) {
                SessionValidation::invalid(InvalidReason::SessionExpired)
            } else if session.table_number != table || session.customer_phone != phone {
                SessionValidation::invalid(InvalidReason::SessionMismatch)
            } else {
                SessionValidation::valid(session.id.clone(), session.created_at)
            };
            Ok(validation)
        })
    }

    fn close_table_sessions(
        &self,
        table: u32,
        phones: Vec<String>,
    ) -> RemoteFuture<'_, RemoteResult<u64>> {
        Box::pin(async move {
            self.check()?;
            let now = Utc::now();
            let mut closed = 0;
            for s in self.sessions.lock().unwrap().iter_mut() {
                if s.table_number == table
                    && s.status == SessionStatus::Active
                    && phones.contains(&s.customer_phone)
                {
                    s.status = SessionStatus::Closed;
                    s.closed_at = Some(now);
                    closed += 1;
                }
            }
            Ok(closed)
        })
    }

    fn count_active_sessions(
        &self,
        table: u32,
        phone: String,
        created_after: DateTime<Utc>,
    ) -> RemoteFuture<'_, RemoteResult<usize>> {
        Box::pin(async move {
            self.check()?;
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .filter(|s| {
                    s.table_number == table
                        && s.customer_phone == phone
                        && s.status == SessionStatus::Active
                        && s.created_at > created_after
                })
                .count())
        })
    }
}
