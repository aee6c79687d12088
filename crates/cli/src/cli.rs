// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::mode::OperatingMode;

// Custom help template that groups commands into sections
const HELP_TEMPLATE: &str = "{about-with-newline}
{usage-heading} {usage}

{before-help}Options:
{options}{after-help}";

const COMMANDS_HELP: &str = "\
Sync:
  mode        Show or switch the operating mode
  status      Show mode, connection state and replica contents
  health      Check the remote store is up
  sync        Stay connected and keep the replica current
  forward     Apply an action and mirror it to the remote store
  endpoint    Show or set the API endpoint override

Sessions:
  session     Create, validate and close table sessions";

const QUICKSTART_HELP: &str = "\
Get started:
  tabsync endpoint http://10.0.0.2:3001/api   Point at the counter's server
  tabsync mode networked                      Switch to networked mode
  tabsync sync                                Keep in sync until Ctrl-C";

#[derive(Parser)]
#[command(name = "tabsync")]
#[command(about = "Table-ordering sync client with local and networked modes")]
#[command(version)]
#[command(help_template = HELP_TEMPLATE)]
#[command(before_help = COMMANDS_HELP)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// Path to tabsync.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Operating mode as given on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Local,
    Networked,
}

impl From<ModeArg> for OperatingMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Local => OperatingMode::Local,
            ModeArg::Networked => OperatingMode::Networked,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the operating mode, or switch it
    #[command(after_help = "Examples:\n  \
        tabsync mode                 Print the current mode\n  \
        tabsync mode networked       Persist networked mode and connect\n  \
        tabsync mode local           Persist local mode")]
    Mode {
        /// Mode to switch to
        mode: Option<ModeArg>,
    },

    /// Show mode, connection state and replica contents
    Status,

    /// Check the remote store's health endpoint
    Health,

    /// Connect and keep the replica in sync until interrupted
    Sync,

    /// Apply an action and forward it to the remote store in networked mode
    #[command(
        arg_required_else_help = true,
        after_help = "Examples:\n  \
        tabsync forward updateOrderStatus '{\"id\":\"o1\",\"status\":\"ready\"}'\n  \
        tabsync forward payBill '{\"id\":\"b1\",\"paymentMethod\":\"cash\"}'\n  \
        tabsync forward deleteMenuItem '{\"id\":\"m1\"}'"
    )]
    Forward {
        /// Action name (e.g. addMenuItem, payBill, callWaiter)
        action: String,

        /// JSON payload for the action
        payload: String,
    },

    /// Show or set the API endpoint override
    Endpoint {
        /// New API base URL
        url: Option<String>,

        /// Remove the override and use the configured URL
        #[arg(long, conflicts_with = "url")]
        clear: bool,
    },

    /// Manage table ordering sessions
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Get or create the session for a table and phone, and make it current
    New {
        table: u32,
        phone: String,

        /// Token to create the session with (generated if omitted)
        #[arg(long)]
        token: Option<String>,
    },

    /// Validate a session token
    Validate {
        table: u32,
        phone: String,
        token: String,
    },

    /// Close a table's sessions after its bill is paid
    #[command(arg_required_else_help = true)]
    Close {
        table: u32,

        /// Phone number(s) on the bill
        #[arg(required = true)]
        phones: Vec<String>,
    },

    /// Check whether a table and phone have an active session
    Active { table: u32, phone: String },

    /// Print the current session token on this device
    Current,

    /// Generate a new session token
    Token,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
