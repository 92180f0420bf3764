// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for offline module tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use feed_core::{
    Comment, Community, KvStore, MemoryStore, OpPayload, Post, QueuedOp, Subscription,
};

use crate::error::RemoteError;
use crate::repository::{
    CommentRepository, CommunityRepository, PostRepository, RepoFuture, Repositories,
};

/// Create a `like_post` operation whose id and timestamp are `n`.
pub fn make_test_op(n: u64) -> QueuedOp {
    QueuedOp::new(n.to_string(), OpPayload::like_post(n as i64, "u1"), n)
}

/// Create an in-memory store behind the trait object the stores expect.
pub fn memory_store() -> Arc<dyn KvStore> {
    Arc::new(MemoryStore::new())
}

/// In-memory store whose removals always fail, as a read-only disk would.
#[derive(Default)]
pub struct StuckStore {
    inner: MemoryStore,
}

impl KvStore for StuckStore {
    fn get(&self, key: &str) -> feed_core::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> feed_core::Result<()> {
        self.inner.set(key, value)
    }

    fn remove(&self, _key: &str) -> feed_core::Result<()> {
        Err(std::io::Error::other("read-only file system").into())
    }

    fn keys(&self) -> feed_core::Result<Vec<String>> {
        self.inner.keys()
    }
}

/// A repository call observed by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SavePost(Post, Option<String>),
    LikePost(i64, String),
    DislikePost(i64, String),
    BookmarkPost(i64, String),
    UnbookmarkPost(i64, String),
    SaveComment(Comment),
    SaveCommunity(Community, Option<String>),
    Subscribe(Subscription),
    Unsubscribe(Subscription),
}

/// Fake backend implementing every repository trait.
///
/// Records each call (including failed ones) and can be told to reject
/// calls that touch particular post ids, or to stall every call.
#[derive(Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<Call>>,
    failing_posts: Mutex<HashSet<i64>>,
    fail_everything: Mutex<bool>,
    delay: Mutex<Option<Duration>>,
    next_id: AtomicI64,
}

impl RecordingBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(RecordingBackend {
            next_id: AtomicI64::new(100),
            ..Default::default()
        })
    }

    /// Bundle this backend as all three repositories.
    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories::new(self.clone(), self.clone(), self.clone())
    }

    /// Reject every call that targets `post_id`.
    pub fn fail_post(&self, post_id: i64) {
        self.failing_posts.lock().unwrap().insert(post_id);
    }

    /// Reject every call.
    pub fn fail_everything(&self) {
        *self.fail_everything.lock().unwrap() = true;
    }

    /// Stall every call for `delay` before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// All calls observed so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call, post_id: Option<i64>) -> Result<(), RemoteError> {
        self.calls.lock().unwrap().push(call);
        let rejected = *self.fail_everything.lock().unwrap()
            || post_id.is_some_and(|id| self.failing_posts.lock().unwrap().contains(&id));
        if rejected {
            Err(RemoteError::Unreachable("injected failure".into()))
        } else {
            Ok(())
        }
    }

    fn answer<T: Send + 'static>(&self, result: Result<T, RemoteError>) -> RepoFuture<'_, T> {
        let delay = *self.delay.lock().unwrap();
        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        })
    }

    fn assign_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

impl PostRepository for RecordingBackend {
    fn save_post(&self, post: Post, image_uri: Option<String>) -> RepoFuture<'_, Post> {
        let result = self
            .record(Call::SavePost(post.clone(), image_uri), None)
            .map(|()| Post {
                id: self.assign_id(),
                ..post
            });
        self.answer(result)
    }

    fn like_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()> {
        let result = self.record(Call::LikePost(post_id, user_id.to_string()), Some(post_id));
        self.answer(result)
    }

    fn dislike_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()> {
        let result = self.record(Call::DislikePost(post_id, user_id.to_string()), Some(post_id));
        self.answer(result)
    }

    fn bookmark_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()> {
        let result = self.record(Call::BookmarkPost(post_id, user_id.to_string()), Some(post_id));
        self.answer(result)
    }

    fn unbookmark_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()> {
        let result = self.record(
            Call::UnbookmarkPost(post_id, user_id.to_string()),
            Some(post_id),
        );
        self.answer(result)
    }
}

impl CommentRepository for RecordingBackend {
    fn save_comment(&self, comment: Comment) -> RepoFuture<'_, Comment> {
        let result = self
            .record(Call::SaveComment(comment.clone()), Some(comment.post_id))
            .map(|()| Comment {
                id: self.assign_id(),
                ..comment
            });
        self.answer(result)
    }
}

impl CommunityRepository for RecordingBackend {
    fn save_community(
        &self,
        community: Community,
        image_uri: Option<String>,
    ) -> RepoFuture<'_, Community> {
        let result = self
            .record(Call::SaveCommunity(community.clone(), image_uri), None)
            .map(|()| Community {
                id: self.assign_id(),
                ..community
            });
        self.answer(result)
    }

    fn subscribe(&self, subscription: Subscription) -> RepoFuture<'_, Subscription> {
        let result = self
            .record(Call::Subscribe(subscription.clone()), None)
            .map(|()| Subscription {
                id: self.assign_id(),
                ..subscription
            });
        self.answer(result)
    }

    fn unsubscribe(&self, subscription: Subscription) -> RepoFuture<'_, ()> {
        let result = self.record(Call::Unsubscribe(subscription), None);
        self.answer(result)
    }
}
