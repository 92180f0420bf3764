// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for feed-core operations.

use thiserror::Error;

/// All possible errors that can occur in feed-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown operation type: '{0}'\n  hint: the queue entry was written by an incompatible version")]
    UnknownOperation(String),

    #[error("invalid payload for '{kind}': {source}")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for feed-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
