// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote repository abstraction.
//!
//! The offline layer only needs the mutation half of each repository. The
//! traits are object safe so a process can hold one set of live
//! repositories behind `Arc<dyn ...>` and tests can substitute recorders.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use feed_core::{Comment, Community, Post, Subscription};

use crate::error::RemoteError;

/// Boxed future returned by repository calls.
pub type RepoFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RemoteError>> + Send + 'a>>;

/// Mutations on posts.
pub trait PostRepository: Send + Sync {
    /// Create (id 0) or update a post, uploading `image_uri` if given.
    fn save_post(&self, post: Post, image_uri: Option<String>) -> RepoFuture<'_, Post>;

    /// Record a like.
    fn like_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()>;

    /// Remove a like.
    fn dislike_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()>;

    /// Bookmark a post.
    fn bookmark_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()>;

    /// Remove a bookmark.
    fn unbookmark_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()>;
}

impl<P: PostRepository + ?Sized> PostRepository for Arc<P> {
    fn save_post(&self, post: Post, image_uri: Option<String>) -> RepoFuture<'_, Post> {
        (**self).save_post(post, image_uri)
    }

    fn like_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()> {
        (**self).like_post(post_id, user_id)
    }

    fn dislike_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()> {
        (**self).dislike_post(post_id, user_id)
    }

    fn bookmark_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()> {
        (**self).bookmark_post(post_id, user_id)
    }

    fn unbookmark_post(&self, post_id: i64, user_id: &str) -> RepoFuture<'_, ()> {
        (**self).unbookmark_post(post_id, user_id)
    }
}

/// Mutations on comments.
pub trait CommentRepository: Send + Sync {
    fn save_comment(&self, comment: Comment) -> RepoFuture<'_, Comment>;
}

/// Mutations on communities and subscriptions.
pub trait CommunityRepository: Send + Sync {
    /// Create (id 0) or update a community, uploading `image_uri` if given.
    fn save_community(
        &self,
        community: Community,
        image_uri: Option<String>,
    ) -> RepoFuture<'_, Community>;

    fn subscribe(&self, subscription: Subscription) -> RepoFuture<'_, Subscription>;

    fn unsubscribe(&self, subscription: Subscription) -> RepoFuture<'_, ()>;
}

/// The repositories a queued operation can target.
#[derive(Clone)]
pub struct Repositories {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub communities: Arc<dyn CommunityRepository>,
}

impl Repositories {
    /// Bundles the three repositories.
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        communities: Arc<dyn CommunityRepository>,
    ) -> Self {
        Repositories {
            posts,
            comments,
            communities,
        }
    }
}
