// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read cache with per-entry time-to-live.
//!
//! Each cache key is an independent [`KvStore`] record holding
//! `{value, writtenAt, ttlMs}`. Expired entries are kept until they are
//! overwritten or cleared so they remain available as a stale fallback.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use feed_core::{ClockSource, KvStore, Result};

/// A cached value together with its freshness metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<T> {
    pub value: T,
    pub written_at: u64,
    pub ttl_ms: u64,
}

impl<T> CacheEntry<T> {
    /// Whether the entry is still within its TTL at `now_ms`.
    ///
    /// The boundary is inclusive: an entry read exactly `ttl_ms` after it
    /// was written is still fresh.
    pub fn is_fresh(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.written_at) <= self.ttl_ms
    }
}

/// Options for [`CacheStore::get_cache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetOptions {
    /// Return the value even if its TTL has elapsed.
    pub allow_expired: bool,
}

impl GetOptions {
    /// Options that accept stale values.
    pub fn allow_expired() -> Self {
        GetOptions {
            allow_expired: true,
        }
    }
}

/// Cache of JSON-serializable values keyed by [`feed_core::CacheKey`] strings.
#[derive(Clone)]
pub struct CacheStore {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn ClockSource>,
}

impl CacheStore {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn ClockSource>) -> Self {
        CacheStore { store, clock }
    }

    /// Writes `value` under `key`, stamped with the current time.
    pub fn set_cache<T: Serialize>(&self, key: &str, value: &T, ttl_ms: u64) -> Result<()> {
        let entry = CacheEntry {
            value,
            written_at: self.clock.now_ms(),
            ttl_ms,
        };
        let raw = serde_json::to_string(&entry)?;
        self.store.set(key, &raw)
    }

    /// Reads the value under `key`.
    ///
    /// Returns `None` when there is no entry, or when the entry is expired
    /// and `opts.allow_expired` is not set.
    pub fn get_cache<T: DeserializeOwned>(&self, key: &str, opts: GetOptions) -> Result<Option<T>> {
        let Some(entry) = self.entry(key)? else {
            return Ok(None);
        };
        if !opts.allow_expired && !entry.is_fresh(self.clock.now_ms()) {
            return Ok(None);
        }
        match serde_json::from_value(entry.value) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "removing cache entry of unexpected shape");
                self.store.remove(key)?;
                Ok(None)
            }
        }
    }

    /// Reads the raw entry under `key`, fresh or not.
    ///
    /// A record that does not parse is removed and reported as a miss.
    pub fn entry(&self, key: &str) -> Result<Option<CacheEntry<Value>>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                tracing::warn!(key, error = %e, "removing corrupt cache entry");
                self.store.remove(key)?;
                Ok(None)
            }
        }
    }

    /// Removes the entry under `key`.
    pub fn clear_cache(&self, key: &str) -> Result<()> {
        tracing::debug!(key, "clearing cache entry");
        self.store.remove(key)
    }

    /// Returns the current time according to the injected clock.
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
