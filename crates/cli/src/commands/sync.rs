// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tokio_util::sync::CancellationToken;
use ts_core::{ConnectionStatus, SyncEvent};

use super::status::print_counts;
use super::Context;
use crate::error::Result;

fn describe(event: &SyncEvent) -> String {
    match event {
        SyncEvent::Connection {
            status: ConnectionStatus::Connected,
        } => "connection: connected".to_string(),
        SyncEvent::Connection {
            status: ConnectionStatus::Disconnected,
        } => "connection: disconnected".to_string(),
        other => format!("{} -> refetch {}", other.kind(), targets(other)),
    }
}

fn targets(event: &SyncEvent) -> String {
    event
        .refetch_targets()
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Stay connected and keep the replica current until Ctrl-C.
///
/// Does nothing in local mode.
pub async fn run(ctx: &Context) -> Result<()> {
    let mut controller = ctx.controller();
    if controller.mode().is_local() {
        println!("Local mode: nothing to sync");
        println!("  hint: run 'tabsync mode networked' first");
        return Ok(());
    }

    controller.resume().await?;
    println!("Connected to {}", ctx.api_url());
    print_counts(&controller.engine().replica().read());

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal.cancel();
        }
    });

    let mut events = controller.engine().bus().subscribe_all();
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            println!("{}", describe(&event));
        }
    });

    let result = controller.engine_mut().run(shutdown).await;
    printer.abort();
    result?;
    println!("Disconnected");
    Ok(())
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
