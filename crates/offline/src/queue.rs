// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable offline write queue.
//!
//! The whole queue is one JSON array stored under a fixed key in a
//! [`KvStore`]. Every mutation rewrites the record, and the backend replaces
//! records atomically, so a crash leaves either the old or the new list.
//! Entries are kept in enqueue order and are never reordered or merged.

use std::sync::{Arc, Mutex, MutexGuard};

use feed_core::{KvStore, QueueEntry, QueuedOp, Result};

/// Storage key holding the serialized queue.
pub const QUEUE_KEY: &str = "offline_write_queue";

/// FIFO queue of pending write operations.
///
/// Read-modify-write cycles are serialized by an internal lock so that
/// concurrent callers on a multi-threaded runtime never hand the same entry
/// to two drains.
pub struct QueueStore {
    store: Arc<dyn KvStore>,
    key: String,
    lock: Mutex<()>,
}

impl QueueStore {
    /// Creates a queue persisted under [`QUEUE_KEY`].
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_key(store, QUEUE_KEY)
    }

    /// Creates a queue persisted under a custom key.
    pub fn with_key(store: Arc<dyn KvStore>, key: impl Into<String>) -> Self {
        QueueStore {
            store,
            key: key.into(),
            lock: Mutex::new(()),
        }
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn load(&self) -> Result<Vec<QueueEntry>> {
        match self.store.get(&self.key)? {
            // An unreadable record is an error, not an empty queue: treating
            // it as empty would overwrite it on the next enqueue.
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, entries: &[QueueEntry]) -> Result<()> {
        let raw = serde_json::to_string(entries)?;
        self.store.set(&self.key, &raw)
    }

    /// Appends an operation to the back of the queue.
    ///
    /// The operation is persisted before this returns.
    pub fn enqueue(&self, op: &QueuedOp) -> Result<()> {
        let entry = op.to_entry()?;
        let _guard = self.guard();
        let mut entries = self.load()?;
        entries.push(entry);
        self.save(&entries)?;
        tracing::info!(id = %op.id, kind = %op.kind(), pending = entries.len(), "queued offline write");
        Ok(())
    }

    /// Returns every queued entry, oldest first, without removing any.
    pub fn peek(&self) -> Result<Vec<QueueEntry>> {
        let _guard = self.guard();
        self.load()
    }

    /// Removes and returns the oldest entry, or `None` if the queue is empty.
    ///
    /// The removal is persisted before the entry is returned: if the caller
    /// then fails to process it, the entry is gone.
    pub fn dequeue_front(&self) -> Result<Option<QueueEntry>> {
        let _guard = self.guard();
        let mut entries = self.load()?;
        if entries.is_empty() {
            return Ok(None);
        }
        let front = entries.remove(0);
        self.save(&entries)?;
        Ok(Some(front))
    }

    /// Removes the front entry if it is still `entry`.
    ///
    /// Used after a successful at-least-once delivery. Returns `false` when
    /// the front has changed (for example, the queue was cleared meanwhile).
    pub fn acknowledge(&self, entry: &QueueEntry) -> Result<bool> {
        let _guard = self.guard();
        let mut entries = self.load()?;
        if entries.first() != Some(entry) {
            return Ok(false);
        }
        entries.remove(0);
        self.save(&entries)?;
        Ok(true)
    }

    /// Returns the number of queued entries.
    pub fn len(&self) -> Result<usize> {
        Ok(self.peek()?.len())
    }

    /// Checks if the queue is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Drops every queued entry.
    pub fn clear(&self) -> Result<()> {
        let _guard = self.guard();
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
