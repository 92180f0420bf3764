// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the feedsync CLI.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] feed_core::Error),

    #[error(transparent)]
    Offline(#[from] feed_offline::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("no cache entry for key: {0}\n  hint: run 'feedsync cache keys' to list cached keys")]
    CacheMiss(String),

    #[error("cache entry expired: {0}\n  hint: pass --allow-expired to show it anyway")]
    CacheExpired(String),

    #[error("invalid payload json: {0}")]
    PayloadJson(#[source] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A specialized Result type for feedsync operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
