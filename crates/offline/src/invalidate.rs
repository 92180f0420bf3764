// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cache invalidation on post mutations.
//!
//! [`InvalidatingPosts`] wraps a live [`PostRepository`] and, after a
//! mutation succeeds, clears the cached collections that mutation makes
//! stale. Only first pages are cleared; later pages expire by TTL.
//!
//! A clear that fails is reported as [`RemoteError::Invalidation`] even
//! though the backend accepted the mutation.

use feed_core::{CacheKey, Post};

use crate::cache::CacheStore;
use crate::error::RemoteError;
use crate::repository::{PostRepository, RepoFuture};

/// Post repository decorator that invalidates affected cache keys.
pub struct InvalidatingPosts<R> {
    inner: R,
    cache: CacheStore,
}

impl<R: PostRepository> InvalidatingPosts<R> {
    pub fn new(inner: R, cache: CacheStore) -> Self {
        InvalidatingPosts { inner, cache }
    }

    /// Returns the wrapped repository.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Clears every key, then reports the first failure.
    fn invalidate(&self, keys: &[String]) -> Result<(), RemoteError> {
        let mut first_err = None;
        for key in keys {
            if let Err(e) = self.cache.clear_cache(key) {
                tracing::warn!(key = %key, error = %e, "failed to invalidate cache entry");
                first_err.get_or_insert(RemoteError::Invalidation(format!("{key}: {e}")));
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn bookmark_keys(user_id: &str) -> [String; 3] {
        [
            CacheKey::saved_posts_by_user(user_id, 0),
            CacheKey::feed_by_user(user_id, 0),
            CacheKey::posts_by_user(user_id, 0),
        ]
    }
}

impl<R: PostRepository> PostRepository for InvalidatingPosts<R> {
    fn save_post(&self, post: Post, image_uri: Option<String>) -> RepoFuture<'_, Post> {
        Box::pin(async move {
            let saved = self.inner.save_post(post, image_uri).await?;
            self.invalidate(&[CacheKey::feed_by_user(&saved.user_id, 0)])?;
            Ok(saved)
        })
    }

    fn like_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()> {
        self.inner.like_post(post_id, user_id)
    }

    fn dislike_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()> {
        self.inner.dislike_post(post_id, user_id)
    }

    fn bookmark_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()> {
        let user_id = user_id.to_string();
        Box::pin(async move {
            self.inner.bookmark_post(post_id, &user_id).await?;
            self.invalidate(&Self::bookmark_keys(&user_id))?;
            Ok(())
        })
    }

    fn unbookmark_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()> {
        let user_id = user_id.to_string();
        Box::pin(async move {
            self.inner.unbookmark_post(post_id, &user_id).await?;
            self.invalidate(&Self::bookmark_keys(&user_id))?;
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "invalidate_tests.rs"]
mod tests;
