// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tabsync - client sync layer for a table-ordering point of sale.
//!
//! This crate provides the core functionality for the `tabsync` CLI: a
//! client that runs either entirely on local state or against a shared
//! remote store, plus the per-table ordering session lifecycle.
//!
//! # Main Components
//!
//! - [`ModeController`](sync::ModeController) - persisted local/networked mode, drives the engine
//! - [`SyncEngine`](sync::SyncEngine) - bootstrap, event channel, refetch on change
//! - [`ActionForwarder`](sync::ActionForwarder) - mirrors local mutations to the remote store
//! - [`SessionManager`](session::SessionManager) - session RPCs with safe defaults
//! - [`LocalSessions`](session::LocalSessions) - closed-session cache and current pointer
//!
//! # Connecting
//!
//! ```rust,ignore
//! use tabsync::{commands::Context, OperatingMode};
//!
//! let ctx = Context::open(None)?;
//! let mut controller = ctx.controller();
//! controller.switch_mode(OperatingMode::Networked).await?;
//! println!("{} orders", controller.engine().replica().read().orders().len());
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod error;
pub mod http;
pub mod kv;
pub mod mode;
pub mod session;
pub mod sync;

pub use cli::{Cli, Command, ModeArg, SessionCommand};
pub use config::Config;
pub use error::{Error, Result};
pub use mode::OperatingMode;

/// Lock a mutex, recovering the data if a holder panicked.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let ctx = commands::Context::open(cli.config.as_deref())?;

    match cli.command {
        Command::Mode { mode } => commands::mode::run(&ctx, mode.map(OperatingMode::from)).await,
        Command::Status => commands::status::run(&ctx).await,
        Command::Health => commands::status::health(&ctx).await,
        Command::Sync => commands::sync::run(&ctx).await,
        Command::Forward { action, payload } => {
            commands::forward::run(&ctx, &action, &payload).await
        }
        Command::Endpoint { url, clear } => commands::endpoint::run(&ctx, url, clear),
        Command::Session(command) => commands::session::run(&ctx, command).await,
    }
}
