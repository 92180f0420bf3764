// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod cache;
pub mod queue;
pub mod status;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::path::PathBuf;
use std::sync::Arc;

use feed_core::{ClockSource, FileStore, KvStore, SystemClock};
use feed_offline::{CacheStore, QueueStore};

use crate::config::{Config, StateDir};
use crate::error::Result;

/// Everything a command needs: the state directory, its configuration and
/// the stores opened over it.
pub struct Context {
    pub state: StateDir,
    pub config: Config,
    pub store: Arc<dyn KvStore>,
    pub clock: Arc<dyn ClockSource>,
}

impl Context {
    /// Opens the state directory at `root` (or the default location).
    pub fn open(root: Option<PathBuf>) -> Result<Self> {
        let state = StateDir::resolve(root)?;
        let config = Config::load(state.root())?;
        let store: Arc<dyn KvStore> = Arc::new(FileStore::open(state.store_dir())?);
        tracing::debug!(state_dir = %state.root().display(), "opened state directory");
        Ok(Context {
            state,
            config,
            store,
            clock: Arc::new(SystemClock),
        })
    }

    pub fn queue(&self) -> QueueStore {
        QueueStore::new(self.store.clone())
    }

    pub fn cache(&self) -> CacheStore {
        CacheStore::new(self.store.clone(), self.clock.clone())
    }
}

/// Formats a millisecond timestamp as RFC 3339, falling back to the raw number.
pub(crate) fn format_millis(ms: u64) -> String {
    i64::try_from(ms)
        .ok()
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
        .unwrap_or_else(|| ms.to_string())
}
