// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Operating mode for the client.
//!
//! Determines whether local state is authoritative (local mode) or a replica
//! of the remote store kept live by the sync engine (networked mode).

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::kv::{keys, KvStore, StoreResult};

/// Operating mode for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperatingMode {
    /// Local mode: local state is authoritative, no sync.
    #[default]
    Local,
    /// Networked mode: local state replicates the remote store.
    Networked,
}

impl OperatingMode {
    /// Read the persisted mode.
    ///
    /// Never fails: missing, unreadable or unrecognized values read as local.
    pub fn load(store: &dyn KvStore) -> Self {
        match store.get(keys::MODE) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "unrecognized persisted mode, using local");
                OperatingMode::Local
            }),
            Ok(None) => OperatingMode::Local,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted mode, using local");
                OperatingMode::Local
            }
        }
    }

    /// Persist this mode.
    pub fn save(&self, store: &dyn KvStore) -> StoreResult<()> {
        store.set(keys::MODE, self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingMode::Local => "local",
            OperatingMode::Networked => "networked",
        }
    }

    /// Returns true if this is local mode.
    pub fn is_local(&self) -> bool {
        *self == OperatingMode::Local
    }

    /// Returns true if this is networked mode.
    pub fn is_networked(&self) -> bool {
        *self == OperatingMode::Networked
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperatingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "local" => Ok(OperatingMode::Local),
            // "backend" is what earlier releases persisted
            "networked" | "backend" => Ok(OperatingMode::Networked),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

const MODE_LOCAL: u8 = 0;
const MODE_NETWORKED: u8 = 1;

/// Process-wide view of the current mode.
///
/// Written only by the mode controller, read by the forwarder and anything
/// else that gates on mode. Cloning shares the same cell.
#[derive(Debug, Clone)]
pub struct SharedMode {
    mode: Arc<AtomicU8>,
}

impl SharedMode {
    pub fn new(mode: OperatingMode) -> Self {
        let shared = SharedMode {
            mode: Arc::new(AtomicU8::new(MODE_LOCAL)),
        };
        shared.set(mode);
        shared
    }

    pub fn get(&self) -> OperatingMode {
        match self.mode.load(Ordering::Acquire) {
            MODE_NETWORKED => OperatingMode::Networked,
            _ => OperatingMode::Local,
        }
    }

    pub(crate) fn set(&self, mode: OperatingMode) {
        let raw = match mode {
            OperatingMode::Local => MODE_LOCAL,
            OperatingMode::Networked => MODE_NETWORKED,
        };
        self.mode.store(raw, Ordering::Release);
    }
}

impl Default for SharedMode {
    fn default() -> Self {
        Self::new(OperatingMode::Local)
    }
}

#[cfg(test)]
#[path = "mode_tests.rs"]
mod tests;
