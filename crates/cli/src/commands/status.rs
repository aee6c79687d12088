// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ts_core::Collection;

use super::Context;
use crate::error::Result;
use crate::sync::{ConnectionState, Replica, SyncError};

/// Print the record count of every collection in `replica`.
pub fn print_counts(replica: &Replica) {
    for collection in Collection::ALL {
        let refreshed = replica
            .refreshed_at(collection)
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<14} {:>5}  {}",
            collection.as_str(),
            replica.count(collection),
            refreshed
        );
    }
}

/// Show mode and endpoint. In networked mode, connect once and report the
/// connection state and what the replica loaded.
///
/// An unreachable backend is reported, not returned as an error.
pub async fn run(ctx: &Context) -> Result<()> {
    let mut controller = ctx.controller();
    println!("Mode:     {}", controller.mode());
    println!("Endpoint: {}", ctx.api_url());
    println!("State:    {}", ctx.state_db_path().display());

    if controller.mode().is_local() {
        return Ok(());
    }

    if let Err(e) = controller.resume().await {
        tracing::debug!(error = %e, "status connect failed");
    }
    let status = controller.status();
    println!("Sync:     {}", status.state);
    if let Some(error) = &status.last_error {
        println!("Error:    {}", error);
    }
    if status.state == ConnectionState::Connected {
        println!();
        print_counts(&controller.engine().replica().read());
    }
    controller.engine_mut().disconnect().await;
    Ok(())
}

/// Check the remote store's health endpoint.
pub async fn health(ctx: &Context) -> Result<()> {
    let url = ctx.api_url();
    if ctx.remote().health().await {
        println!("{}: ok", url);
        Ok(())
    } else {
        Err(SyncError::Unreachable.into())
    }
}
