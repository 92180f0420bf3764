// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the offline layer.

use thiserror::Error;

/// Failure reported by a remote repository call.
///
/// Repositories are black boxes to this crate: a call either resolves or
/// fails with one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The backend could not be reached.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered but refused the request.
    #[error("backend rejected request: {0}")]
    Rejected(String),

    /// The call succeeded but a cache entry it made stale could not be
    /// cleared.
    #[error("cache invalidation failed: {0}")]
    Invalidation(String),
}

/// All possible errors that can occur in the offline layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage or decoding failure from feed-core.
    #[error(transparent)]
    Core(#[from] feed_core::Error),

    /// A repository call failed.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// A repository call exceeded the configured timeout.
    #[error("remote call timed out after {0} ms")]
    Timeout(u64),
}

impl Error {
    /// Whether running the same operation again later may succeed.
    ///
    /// Remote failures and timeouts are retryable. Unknown operation types,
    /// malformed payloads and local storage failures are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Remote(_) | Error::Timeout(_))
    }
}

/// Result type for offline layer operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
