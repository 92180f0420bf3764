// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Replays a queued operation against the remote repositories.
//!
//! Each operation kind maps to exactly one repository call. The processor
//! performs no retries and has no side effects beyond that call; retry
//! policy belongs to the sync manager.

use feed_core::{Comment, Community, OpPayload, Post, QueueEntry, QueuedOp, Subscription};

use crate::error::Result;
use crate::repository::Repositories;

/// Decodes a persisted entry and replays it.
///
/// # Errors
///
/// Fails with a non-retryable [`feed_core::Error::UnknownOperation`] or
/// [`feed_core::Error::InvalidPayload`] if the entry cannot be decoded, and
/// with a retryable [`crate::Error::Remote`] if the repository call fails.
pub async fn process(entry: &QueueEntry, repos: &Repositories) -> Result<()> {
    let op = entry.decode()?;
    dispatch(&op, repos).await
}

/// Issues the single repository call that corresponds to `op`.
pub async fn dispatch(op: &QueuedOp, repos: &Repositories) -> Result<()> {
    tracing::debug!(id = %op.id, kind = %op.kind(), "dispatching queued write");

    match &op.payload {
        OpPayload::CreatePost(p) => {
            let post = Post {
                id: 0,
                content: p.content.clone(),
                community_id: p.community_id,
                user_id: p.user_id.clone(),
                image_url: None,
                moderation_status: p.moderation_status,
            };
            repos.posts.save_post(post, p.image_uri.clone()).await?;
        }
        OpPayload::CreateCommunity(c) => {
            let community = Community {
                id: 0,
                title: c.title.clone(),
                description: c.description.clone(),
                owner_id: c.owner_id.clone(),
                image_url: None,
            };
            repos
                .communities
                .save_community(community, c.image_uri.clone())
                .await?;
        }
        OpPayload::LikePost(a) => repos.posts.like_post(a.post_id, &a.user_id).await?,
        OpPayload::UnlikePost(a) => repos.posts.dislike_post(a.post_id, &a.user_id).await?,
        OpPayload::SavePost(a) => repos.posts.bookmark_post(a.post_id, &a.user_id).await?,
        OpPayload::UnsavePost(a) => repos.posts.unbookmark_post(a.post_id, &a.user_id).await?,
        OpPayload::AddComment(c) => {
            let comment = Comment {
                id: 0,
                post_id: c.post_id,
                user_id: c.user_id.clone(),
                content: c.content.clone(),
            };
            repos.comments.save_comment(comment).await?;
        }
        OpPayload::SubscribeCommunity(s) => {
            repos.communities.subscribe(subscription(s)).await?;
        }
        OpPayload::UnsubscribeCommunity(s) => {
            repos.communities.unsubscribe(subscription(s)).await?;
        }
    }

    Ok(())
}

fn subscription(change: &feed_core::SubscriptionChange) -> Subscription {
    Subscription {
        id: change.id,
        user_id: change.user_id.clone(),
        community_id: change.community_id,
    }
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
