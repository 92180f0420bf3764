// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand};
use std::path::PathBuf;

const QUICKSTART_HELP: &str = "\
Get started:
  feedsync status                         Connectivity and pending writes
  feedsync queue list                     Show queued writes, oldest first
  feedsync queue push like_post '{\"postId\":10,\"userId\":\"u1\"}'
  feedsync cache keys                     List cached keys";

#[derive(Parser)]
#[command(name = "feedsync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and maintain the feed client's offline queue and read cache")]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// State directory holding config.toml, store/ and offline-images/
    #[arg(long, global = true, env = "FEEDSYNC_STATE_DIR", value_name = "path")]
    pub state_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Inspect or edit the offline write queue
    #[command(subcommand)]
    Queue(QueueCommand),

    /// Inspect or clear read-cache entries
    #[command(subcommand)]
    Cache(CacheCommand),

    /// Show connectivity and the number of pending writes
    Status,
}

#[derive(Subcommand)]
pub enum QueueCommand {
    /// List queued writes, oldest first
    List {
        /// Print one JSON entry per line
        #[arg(long)]
        json: bool,
    },

    /// Print the number of queued writes
    Count,

    /// Drop every queued write
    Clear,

    /// Queue a write by hand
    #[command(after_help = "Examples:\n  \
        feedsync queue push like_post '{\"postId\":10,\"userId\":\"u1\"}'\n  \
        feedsync queue push add_comment '{\"postId\":12,\"userId\":\"u1\",\"content\":\"Yo\"}'")]
    Push {
        /// Operation type (create_post, like_post, add_comment, ...)
        #[arg(value_name = "type")]
        kind: String,

        /// Operation payload as JSON
        payload: String,
    },
}

#[derive(Subcommand)]
pub enum CacheCommand {
    /// Show a cached value and its freshness
    Show {
        /// Cache key, e.g. feed:user:u1:page:0
        key: String,

        /// Show the value even if its TTL has elapsed
        #[arg(long)]
        allow_expired: bool,
    },

    /// Remove a cache entry
    Clear {
        /// Cache key to remove
        key: String,
    },

    /// List cached keys
    Keys,
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
