// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! feed-offline: offline resilience layer for the feed client.
//!
//! Captures user mutations made without connectivity, replays them in order
//! once the network returns, and serves reads from a TTL cache that falls
//! back to stale data when the network is unavailable.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐ online  ┌──────────────┐
//! │   Outbox    │────────►│ Repositories │◄──────────┐
//! │  (submit)   │         └──────────────┘           │
//! └─────────────┘                                    │
//!        │ offline                                   │
//!        ▼                                           │
//! ┌─────────────┐  drain  ┌──────────────┐   ┌──────────────┐
//! │ QueueStore  │────────►│ SyncManager  │──►│  processor   │
//! │   (FIFO)    │         └──────────────┘   └──────────────┘
//! └─────────────┘                │
//!                                ▼
//!                         ┌──────────────┐
//!                         │ Connectivity │
//!                         └──────────────┘
//!                                ▲
//! ┌─────────────┐         ┌──────────────┐
//! │ CacheStore  │◄────────│  CacheFirst  │
//! │   (TTL)     │         │   (reads)    │
//! └─────────────┘         └──────────────┘
//! ```
//!
//! Both stores sit on a [`feed_core::KvStore`] and read time through a
//! [`feed_core::ClockSource`], so every component can be built over an
//! in-memory store and a manual clock in tests.

pub mod cache;
pub mod cache_first;
pub mod connectivity;
pub mod error;
pub mod images;
pub mod invalidate;
pub mod outbox;
pub mod processor;
pub mod queue;
pub mod repository;
pub mod sync;

pub use cache::{CacheEntry, CacheStore, GetOptions};
pub use cache_first::CacheFirst;
pub use connectivity::{Connectivity, NetworkState, StaticConnectivity, TcpProbe};
pub use error::{Error, RemoteError, Result};
pub use images::{persist_offline_image, persist_payload_image, OFFLINE_IMAGE_DIR};
pub use invalidate::InvalidatingPosts;
pub use outbox::{Outbox, Submission};
pub use queue::{QueueStore, QUEUE_KEY};
pub use repository::{
    CommentRepository, CommunityRepository, PostRepository, RepoFuture, Repositories,
};
pub use sync::{DeliveryMode, SyncConfig, SyncManager, SyncReport};

#[cfg(test)]
mod test_helpers;
