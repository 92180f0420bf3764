// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cache-first reads.
//!
//! A read resolves in this order, first match wins:
//!
//! 1. fresh cache hit (the fetcher is not called)
//! 2. offline: the cached value even if expired, else `None`
//! 3. online: fetch, cache the result, return it
//! 4. fetch failed: the expired cached value if there is one, else the error

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{CacheStore, GetOptions};
use crate::connectivity::Connectivity;
use crate::error::{RemoteError, Result};

/// Reads through a [`CacheStore`], consulting the network only when needed.
#[derive(Clone)]
pub struct CacheFirst {
    cache: CacheStore,
    connectivity: Arc<dyn Connectivity>,
}

impl CacheFirst {
    pub fn new(cache: CacheStore, connectivity: Arc<dyn Connectivity>) -> Self {
        CacheFirst {
            cache,
            connectivity,
        }
    }

    /// Returns the underlying cache, for invalidation.
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Returns the value for `key`, fetching it with `fetcher` if the cache
    /// cannot answer.
    ///
    /// # Errors
    ///
    /// Returns the fetch error only when the fetch failed and no cached
    /// value, fresh or expired, exists. Local storage errors always
    /// propagate.
    pub async fn fetch<T, F, Fut>(&self, key: &str, ttl_ms: u64, fetcher: F) -> Result<Option<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, RemoteError>>,
    {
        if let Some(fresh) = self.cache.get_cache(key, GetOptions::default())? {
            tracing::debug!(key, "cache hit");
            return Ok(Some(fresh));
        }

        if !self.connectivity.network_state().await.is_connected {
            tracing::debug!(key, "offline, serving cached value if any");
            return Ok(self.cache.get_cache(key, GetOptions::allow_expired())?);
        }

        match fetcher().await {
            Ok(value) => {
                self.cache.set_cache(key, &value, ttl_ms)?;
                Ok(Some(value))
            }
            Err(e) => match self.cache.get_cache(key, GetOptions::allow_expired())? {
                Some(stale) => {
                    tracing::info!(key, error = %e, "fetch failed, serving stale cache");
                    Ok(Some(stale))
                }
                None => Err(e.into()),
            },
        }
    }
}

#[cfg(test)]
#[path = "cache_first_tests.rs"]
mod tests;
