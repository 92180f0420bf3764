// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! feed-core: Shared library for the feed offline layer
//!
//! This crate provides the data structures and storage primitives used by
//! the `feed-offline` sync engine and the `feedsync` CLI: queued write
//! operations, domain records, the cache key namespace, key-value storage
//! backends and an injectable clock.

pub mod cache_key;
pub mod clock;
pub mod error;
pub mod kv;
pub mod model;
pub mod op;

pub use cache_key::{CacheKey, CacheTtl};
pub use clock::{ClockSource, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use kv::{FileStore, KvStore, MemoryStore};
pub use model::{Comment, Community, ModerationStatus, Post, Subscription};
pub use op::{
    NewComment, NewCommunity, NewPost, OpKind, OpPayload, PostAction, QueueEntry, QueuedOp,
    SubscriptionChange,
};
