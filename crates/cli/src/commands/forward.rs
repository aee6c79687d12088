// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ts_core::Action;

use super::Context;
use crate::error::Result;

/// Parse a named action from its JSON payload.
///
/// Names outside the action set give `None`.
pub fn parse_action(name: &str, payload: &str) -> Result<Option<Action>> {
    let payload: serde_json::Value = serde_json::from_str(payload)?;
    Ok(Action::from_named(name, payload)?)
}

/// Apply an action and, in networked mode, mirror it to the remote store.
///
/// An unknown action name is a no-op.
pub async fn run(ctx: &Context, name: &str, payload: &str) -> Result<()> {
    let Some(action) = parse_action(name, payload)? else {
        tracing::warn!(action = name, "ignoring unknown action");
        println!("Ignored unknown action '{}'", name);
        return Ok(());
    };
    let controller = ctx.controller();

    if controller.perform(&action).await? {
        println!("Forwarded {} to {}", action.name(), ctx.api_url());
    } else {
        println!("Applied {} locally ({} mode)", action.name(), controller.mode());
    }
    Ok(())
}

#[cfg(test)]
#[path = "forward_tests.rs"]
mod tests;
