// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `TABSYNC_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    std::env::var(vars::TABSYNC_CONFIG).ok().map(PathBuf::from)
}

/// Returns the value of `TABSYNC_STATE_DIR` if set.
pub fn state_dir() -> Option<PathBuf> {
    std::env::var(vars::TABSYNC_STATE_DIR)
        .ok()
        .map(PathBuf::from)
}

/// Returns the value of `TABSYNC_API_URL` if set and non-empty.
pub fn api_url() -> Option<String> {
    std::env::var(vars::TABSYNC_API_URL)
        .ok()
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
