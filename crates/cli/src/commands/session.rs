// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ts_core::{CurrentSession, InvalidReason};

use super::Context;
use crate::error::{Error, Result};
use crate::session::{generate_session_token, LocalSessions, SessionManager};

/// Get or create the session for `table` and `phone` and make it this
/// device's current session.
pub async fn new(
    manager: &SessionManager,
    table: u32,
    phone: &str,
    token: Option<String>,
) -> Result<()> {
    let token = token.unwrap_or_else(generate_session_token);
    let session = manager
        .get_or_create_session(table, phone, &token)
        .await
        .ok_or(Error::SessionUnavailable)?;

    manager.set_current_session(&CurrentSession::new(
        table,
        phone,
        session.session_token.as_str(),
    ))?;
    if session.session_token != token {
        println!("Joined existing session {}", session.id);
    } else {
        println!("Created session {}", session.id);
    }
    println!("Token: {}", session.session_token);
    Ok(())
}

/// Validate a token. Locally closed tokens are rejected without a remote call.
pub async fn validate(manager: &SessionManager, table: u32, phone: &str, token: &str) -> Result<()> {
    if manager.is_session_closed(token) {
        return Err(Error::SessionRejected(
            InvalidReason::SessionClosed.guidance().to_string(),
        ));
    }

    let validation = manager.validate_session(table, phone, token).await;
    if validation.valid {
        println!("Valid");
        return Ok(());
    }
    let message = validation
        .display_message()
        .unwrap_or("session is not valid")
        .to_string();
    Err(Error::SessionRejected(message))
}

/// Close a table's sessions remotely and locally.
pub async fn close(manager: &SessionManager, table: u32, phones: &[String]) -> Result<()> {
    let (closed, local) = manager.settle_table(table, phones).await;
    println!("Closed {} session(s) at table {}", closed, table);
    if local {
        println!("Current session on this device closed");
    }
    Ok(())
}

pub async fn active(manager: &SessionManager, table: u32, phone: &str) -> Result<()> {
    if manager.has_active_session(table, phone).await {
        println!("Active");
    } else {
        println!("No active session");
    }
    Ok(())
}

/// Print the current session pointer.
pub fn current(local: &LocalSessions) -> Result<()> {
    match local.current_session() {
        Some(session) => {
            let state = match session.token() {
                Some(token) if local.is_session_closed(token) => "closed",
                Some(_) => "open",
                None => "no token",
            };
            println!(
                "Table {} ({}): {} [{}]",
                session.table,
                session.phone,
                session.token().unwrap_or("-"),
                state
            );
        }
        None => println!("No current session"),
    }
    Ok(())
}

pub fn token() {
    println!("{}", generate_session_token());
}

/// Dispatch a session subcommand.
pub async fn run(ctx: &Context, command: crate::cli::SessionCommand) -> Result<()> {
    use crate::cli::SessionCommand;

    match command {
        SessionCommand::Current => current(&ctx.local_sessions()),
        SessionCommand::Token => {
            token();
            Ok(())
        }
        SessionCommand::New {
            table,
            phone,
            token,
        } => new(&ctx.sessions()?, table, &phone, token).await,
        SessionCommand::Validate {
            table,
            phone,
            token,
        } => validate(&ctx.sessions()?, table, &phone, &token).await,
        SessionCommand::Close { table, phones } => close(&ctx.sessions()?, table, &phones).await,
        SessionCommand::Active { table, phone } => active(&ctx.sessions()?, table, &phone).await,
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
