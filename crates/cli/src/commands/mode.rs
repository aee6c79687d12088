// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::status::print_counts;
use super::Context;
use crate::error::Result;
use crate::mode::OperatingMode;

/// Print the persisted mode, or switch to `target`.
///
/// Switching to networked connects once so the endpoint is checked and the
/// replica loaded. A failed connect leaves the mode switched.
pub async fn run(ctx: &Context, target: Option<OperatingMode>) -> Result<()> {
    let Some(target) = target else {
        println!("{}", OperatingMode::load(ctx.store.as_ref()));
        return Ok(());
    };

    let mut controller = ctx.controller();
    let previous = controller.mode();
    controller.switch_mode(target).await?;

    if target.is_networked() {
        if !controller.engine().is_connected() {
            controller.resume().await?;
        }
        print_counts(&controller.engine().replica().read());
        controller.engine_mut().disconnect().await;
    }

    if previous == target {
        println!("Already in {} mode", target);
    } else {
        println!("Switched from {} to {} mode", previous, target);
    }
    Ok(())
}

#[cfg(test)]
#[path = "mode_tests.rs"]
mod tests;
