// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Drains the offline queue once connectivity returns.
//!
//! A sync pass is a single attempt, not a scheduler: it processes entries
//! front to back, one at a time, and stops at the first failure. The caller
//! triggers another pass later (next foreground, next sign-in) to pick up
//! whatever is left.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use feed_core::QueueEntry;

use crate::connectivity::Connectivity;
use crate::error::{Error, Result};
use crate::processor;
use crate::queue::QueueStore;
use crate::repository::Repositories;

/// When a queued entry leaves the queue relative to its processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Remove the entry, then process it. A failure loses that entry; a
    /// crash never replays one.
    #[default]
    AtMostOnce,
    /// Process the front entry, then remove it. A retryable failure leaves
    /// it at the front for the next pass; a crash between success and
    /// removal replays it, so repository calls must tolerate duplicates.
    /// Entries that can never succeed (unknown type, bad payload) are still
    /// removed so they cannot block the queue.
    AtLeastOnce,
}

impl DeliveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::AtMostOnce => "at_most_once",
            DeliveryMode::AtLeastOnce => "at_least_once",
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for sync passes.
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    /// Delivery semantics for each entry.
    pub delivery: DeliveryMode,
    /// Upper bound on a single processor call. `None` waits indefinitely.
    pub call_timeout: Option<Duration>,
}

/// Outcome of a sync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Entries processed successfully during this pass.
    pub synced: usize,
    /// Entries still queued after the pass.
    pub remaining: usize,
}

/// Drives sync passes over a [`QueueStore`].
pub struct SyncManager {
    queue: Arc<QueueStore>,
    connectivity: Arc<dyn Connectivity>,
    config: SyncConfig,
    /// Held for the duration of a pass so two passes never interleave.
    pass: tokio::sync::Mutex<()>,
}

impl SyncManager {
    /// Create a manager with default configuration.
    pub fn new(queue: Arc<QueueStore>, connectivity: Arc<dyn Connectivity>) -> Self {
        Self::with_config(queue, connectivity, SyncConfig::default())
    }

    /// Create a manager with custom configuration.
    pub fn with_config(
        queue: Arc<QueueStore>,
        connectivity: Arc<dyn Connectivity>,
        config: SyncConfig,
    ) -> Self {
        SyncManager {
            queue,
            connectivity,
            config,
            pass: tokio::sync::Mutex::new(()),
        }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Replays queued writes against live repositories.
    pub async fn sync_with(&self, repos: &Repositories) -> Result<SyncReport> {
        self.sync_queued_writes(|entry| async move { processor::process(&entry, repos).await })
            .await
    }

    /// Runs one sync pass, handing each entry to `processor` in order.
    ///
    /// While offline nothing is attempted and the report carries the current
    /// queue length. Online, the pass stops at the first processor error and
    /// returns it; entries behind the failing one stay queued.
    pub async fn sync_queued_writes<F, Fut>(&self, mut processor: F) -> Result<SyncReport>
    where
        F: FnMut(QueueEntry) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let _pass = self.pass.lock().await;

        if !self.connectivity.network_state().await.is_connected {
            let remaining = self.queue.len()?;
            tracing::debug!(remaining, "offline, skipping sync pass");
            return Ok(SyncReport {
                synced: 0,
                remaining,
            });
        }

        let mut synced = 0;
        loop {
            let step = match self.config.delivery {
                DeliveryMode::AtMostOnce => self.step_at_most_once(&mut processor).await,
                DeliveryMode::AtLeastOnce => self.step_at_least_once(&mut processor).await,
            };
            match step {
                Ok(true) => synced += 1,
                Ok(false) => break,
                Err(e) => {
                    tracing::warn!(synced, error = %e, "sync pass stopped");
                    return Err(e);
                }
            }
        }

        let remaining = self.queue.len()?;
        if synced > 0 {
            tracing::info!(synced, remaining, "synced queued writes");
        }
        Ok(SyncReport { synced, remaining })
    }

    /// Processes one entry. Returns `Ok(false)` when the queue is empty.
    async fn step_at_most_once<F, Fut>(&self, processor: &mut F) -> Result<bool>
    where
        F: FnMut(QueueEntry) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let Some(entry) = self.queue.dequeue_front()? else {
            return Ok(false);
        };
        let id = entry.id.clone();
        self.bounded(processor(entry)).await.inspect_err(|e| {
            tracing::warn!(id = %id, error = %e, "dropped queued write after failure");
        })?;
        Ok(true)
    }

    async fn step_at_least_once<F, Fut>(&self, processor: &mut F) -> Result<bool>
    where
        F: FnMut(QueueEntry) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let Some(entry) = self.queue.peek()?.into_iter().next() else {
            return Ok(false);
        };
        match self.bounded(processor(entry.clone())).await {
            Ok(()) => {
                self.queue.acknowledge(&entry)?;
                Ok(true)
            }
            Err(e) if !e.is_retryable() => {
                tracing::warn!(id = %entry.id, error = %e, "dropped unprocessable queued write");
                self.queue.acknowledge(&entry)?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    async fn bounded<Fut>(&self, call: Fut) -> Result<()>
    where
        Fut: Future<Output = Result<()>>,
    {
        match self.config.call_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| Error::Timeout(limit.as_millis() as u64))?,
            None => call.await,
        }
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
