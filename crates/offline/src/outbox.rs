// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entry point for user mutations.
//!
//! A screen action hands its payload to [`Outbox::submit`]. Online, the
//! matching repository call is made immediately; offline, the payload is
//! queued for the next sync pass. Either way the caller has already applied
//! its optimistic update and only needs to roll it back on error.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use feed_core::{ClockSource, OpPayload, QueuedOp};

use crate::connectivity::Connectivity;
use crate::error::Result;
use crate::images::persist_payload_image;
use crate::processor;
use crate::queue::QueueStore;
use crate::repository::Repositories;

/// What [`Outbox::submit`] did with a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Offline: queued under this id.
    Queued(String),
    /// Online: the repository call succeeded.
    Sent,
}

/// Routes mutations to the backend or the offline queue.
pub struct Outbox {
    queue: Arc<QueueStore>,
    connectivity: Arc<dyn Connectivity>,
    repos: Repositories,
    clock: Arc<dyn ClockSource>,
    image_dir: Option<PathBuf>,
    seq: AtomicU64,
}

impl Outbox {
    pub fn new(
        queue: Arc<QueueStore>,
        connectivity: Arc<dyn Connectivity>,
        repos: Repositories,
        clock: Arc<dyn ClockSource>,
    ) -> Self {
        Outbox {
            queue,
            connectivity,
            repos,
            clock,
            image_dir: None,
            seq: AtomicU64::new(0),
        }
    }

    /// Copy images of queued creates into `dir` before queueing.
    pub fn with_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_dir = Some(dir.into());
        self
    }

    /// Sends `payload` now, or queues it if the device is offline.
    ///
    /// # Errors
    ///
    /// Online, returns the repository error unchanged. Offline, fails only
    /// if the queue cannot be written.
    pub async fn submit(&self, payload: OpPayload) -> Result<Submission> {
        let now = self.clock.now_ms();
        let op = QueuedOp::new(self.next_id(now), payload, now);

        if self.connectivity.network_state().await.is_connected {
            processor::dispatch(&op, &self.repos).await?;
            return Ok(Submission::Sent);
        }

        let op = self.with_durable_image(op);
        self.queue.enqueue(&op)?;
        Ok(Submission::Queued(op.id))
    }

    /// Ids are the submit time in millis, suffixed with a counter so two
    /// submits in the same millisecond stay distinct.
    fn next_id(&self, now_ms: u64) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        format!("{now_ms}-{seq}")
    }

    fn with_durable_image(&self, mut op: QueuedOp) -> QueuedOp {
        if let Some(dir) = &self.image_dir {
            persist_payload_image(&mut op.payload, dir, self.clock.as_ref());
        }
        op
    }
}

#[cfg(test)]
#[path = "outbox_tests.rs"]
mod tests;
