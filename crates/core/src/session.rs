// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Anonymous per-table ordering sessions.
//!
//! A session is owned by the remote authority. The client only holds a copy
//! of the token, the last validation result, and a pointer to the session
//! the device is currently ordering under.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An active session older than this is treated as expired at read time.
pub const SESSION_STALENESS_HOURS: i64 = 4;

/// Returns the staleness window as a duration.
pub fn staleness_window() -> Duration {
    Duration::hours(SESSION_STALENESS_HOURS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Closed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A table session as stored by the remote authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSession {
    pub id: String,
    pub table_number: u32,
    pub customer_phone: String,
    pub session_token: String,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

impl TableSession {
    /// Returns true if the session is active and inside the staleness window.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.status == SessionStatus::Active && !self.is_stale_at(now)
    }

    /// Returns true if the session was created at least the staleness
    /// window before `now`, regardless of status.
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= staleness_window()
    }
}

/// Why a session failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    SessionNotFound,
    SessionClosed,
    SessionExpired,
    /// The token exists but belongs to another table or phone.
    SessionMismatch,
}

impl InvalidReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidReason::SessionNotFound => "session_not_found",
            InvalidReason::SessionClosed => "session_closed",
            InvalidReason::SessionExpired => "session_expired",
            InvalidReason::SessionMismatch => "session_mismatch",
        }
    }

    /// Customer-facing guidance for this reason.
    pub fn guidance(&self) -> &'static str {
        match self {
            InvalidReason::SessionNotFound => {
                "We couldn't find your ordering session. Please scan the table QR code again."
            }
            InvalidReason::SessionClosed => {
                "This table's bill has been settled. Please scan the QR code to start a new order."
            }
            InvalidReason::SessionExpired => {
                "This ordering link has expired. Please scan the table QR code again."
            }
            InvalidReason::SessionMismatch => {
                "This ordering link belongs to a different table or customer."
            }
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InvalidReason {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "session_not_found" => Ok(InvalidReason::SessionNotFound),
            "session_closed" => Ok(InvalidReason::SessionClosed),
            "session_expired" => Ok(InvalidReason::SessionExpired),
            "session_mismatch" => Ok(InvalidReason::SessionMismatch),
            _ => Err(Error::InvalidSessionReason(s.to_string())),
        }
    }
}

/// Message returned when the validation service cannot be reached.
pub const VALIDATION_UNAVAILABLE_MESSAGE: &str = "Unable to validate session. Please try again.";

/// Result of validating a session token. Pure read; nothing is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionValidation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<InvalidReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SessionValidation {
    /// A passing validation for the given session.
    pub fn valid(session_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        SessionValidation {
            valid: true,
            reason: None,
            message: None,
            session_id: Some(session_id.into()),
            created_at: Some(created_at),
        }
    }

    /// A failing validation carrying the reason's default guidance.
    pub fn invalid(reason: InvalidReason) -> Self {
        Self::invalid_with_message(reason, reason.guidance())
    }

    pub fn invalid_with_message(reason: InvalidReason, message: impl Into<String>) -> Self {
        SessionValidation {
            valid: false,
            reason: Some(reason),
            message: Some(message.into()),
            session_id: None,
            created_at: None,
        }
    }

    /// The result reported when the validation RPC fails.
    pub fn unavailable() -> Self {
        Self::invalid_with_message(InvalidReason::SessionNotFound, VALIDATION_UNAVAILABLE_MESSAGE)
    }

    /// Message to show the customer, falling back to the reason's guidance.
    pub fn display_message(&self) -> Option<&str> {
        if self.valid {
            return None;
        }
        self.message
            .as_deref()
            .or_else(|| self.reason.map(|r| r.guidance()))
    }
}

/// The session this device is currently ordering under.
///
/// Stored as JSON in durable local storage. Fields may be missing in data
/// written by older clients, so every field defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSession {
    #[serde(default)]
    pub table: u32,
    #[serde(default)]
    pub phone: String,
    #[serde(rename = "sessionToken", default)]
    pub session_token: String,
}

impl CurrentSession {
    pub fn new(table: u32, phone: impl Into<String>, session_token: impl Into<String>) -> Self {
        CurrentSession {
            table,
            phone: phone.into(),
            session_token: session_token.into(),
        }
    }

    /// Returns true if this pointer is for `table` and one of `phones`, and
    /// carries a token.
    pub fn matches(&self, table: u32, phones: &[String]) -> bool {
        self.table == table
            && !self.phone.is_empty()
            && !self.session_token.is_empty()
            && phones.iter().any(|p| *p == self.phone)
    }

    /// The token, if one was recorded.
    pub fn token(&self) -> Option<&str> {
        if self.session_token.is_empty() {
            None
        } else {
            Some(&self.session_token)
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
