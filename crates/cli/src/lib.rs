// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! feedsync - maintenance tool for the feed client's offline state.
//!
//! This crate provides the `feedsync` CLI over a state directory holding
//! the offline write queue and the read cache, both persisted through
//! [`feed_core::FileStore`].
//!
//! # Main Components
//!
//! - [`Config`] - Settings from `config.toml` (probe address, delivery mode)
//! - [`StateDir`] - Layout of the state directory
//! - [`Error`] - Error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use clap::Parser;
//! use feedsync::Cli;
//!
//! let cli = Cli::parse_from(["feedsync", "queue", "count"]);
//! feedsync::run(cli)?;
//! ```

mod cli;
mod commands;

pub mod config;
pub mod error;
pub mod logging;

pub use cli::{CacheCommand, Cli, Command, QueueCommand};
pub use config::{default_state_dir, Config, StateDir};
pub use error::{Error, Result};

use commands::Context;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context::open(cli.state_dir)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Queue(QueueCommand::List { json }) => commands::queue::list(&ctx, json, &mut out),
        Command::Queue(QueueCommand::Count) => commands::queue::count(&ctx, &mut out),
        Command::Queue(QueueCommand::Clear) => commands::queue::clear(&ctx, &mut out),
        Command::Queue(QueueCommand::Push { kind, payload }) => {
            commands::queue::push(&ctx, &kind, &payload, &mut out)
        }
        Command::Cache(CacheCommand::Show { key, allow_expired }) => {
            commands::cache::show(&ctx, &key, allow_expired, &mut out)
        }
        Command::Cache(CacheCommand::Clear { key }) => commands::cache::clear(&ctx, &key, &mut out),
        Command::Cache(CacheCommand::Keys) => commands::cache::keys(&ctx, &mut out),
        Command::Status => commands::status::run(&ctx, &mut out),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
