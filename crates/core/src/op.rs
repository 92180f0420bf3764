// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queued write operations.
//!
//! Every mutation a user makes while offline is recorded as a [`QueuedOp`]:
//! an id, a typed [`OpPayload`] and the enqueue timestamp. On disk the
//! operation is stored as a [`QueueEntry`], which keeps the type tag as a
//! plain string and the payload as raw JSON:
//!
//! ```json
//! {"id":"1718000000000","type":"like_post","payload":{"postId":10,"userId":"u1"},"createdAt":1718000000000}
//! ```
//!
//! Keeping the wire form loose means an entry written by a newer build (or a
//! damaged one) only fails when that entry is decoded, instead of making the
//! whole queue unreadable.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::ModerationStatus;

/// The closed set of operations that can be queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    CreatePost,
    CreateCommunity,
    LikePost,
    UnlikePost,
    SavePost,
    UnsavePost,
    AddComment,
    SubscribeCommunity,
    UnsubscribeCommunity,
}

impl OpKind {
    /// Every kind, in declaration order.
    pub const ALL: [OpKind; 9] = [
        OpKind::CreatePost,
        OpKind::CreateCommunity,
        OpKind::LikePost,
        OpKind::UnlikePost,
        OpKind::SavePost,
        OpKind::UnsavePost,
        OpKind::AddComment,
        OpKind::SubscribeCommunity,
        OpKind::UnsubscribeCommunity,
    ];

    /// Returns the tag stored in the `type` field of a queue entry.
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::CreatePost => "create_post",
            OpKind::CreateCommunity => "create_community",
            OpKind::LikePost => "like_post",
            OpKind::UnlikePost => "unlike_post",
            OpKind::SavePost => "save_post",
            OpKind::UnsavePost => "unsave_post",
            OpKind::AddComment => "add_comment",
            OpKind::SubscribeCommunity => "subscribe_community",
            OpKind::UnsubscribeCommunity => "unsubscribe_community",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OpKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OpKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownOperation(s.to_string()))
    }
}

/// Payload of `create_post`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub content: String,
    pub community_id: i64,
    pub user_id: String,
    /// Local image to upload with the post.
    #[serde(default)]
    pub image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderation_status: Option<ModerationStatus>,
}

/// Payload of `create_community`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommunity {
    pub title: String,
    pub description: String,
    pub owner_id: String,
    #[serde(default)]
    pub image_uri: Option<String>,
}

/// Payload shared by the like/unlike/save/unsave operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAction {
    pub post_id: i64,
    pub user_id: String,
}

/// Payload of `add_comment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: i64,
    pub user_id: String,
    pub content: String,
}

/// Payload of `subscribe_community` and `unsubscribe_community`.
///
/// `id` is the existing subscription id (0 when none is known yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionChange {
    #[serde(default)]
    pub id: i64,
    pub user_id: String,
    pub community_id: i64,
}

/// Typed payload of a queued operation, one variant per [`OpKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpPayload {
    CreatePost(NewPost),
    CreateCommunity(NewCommunity),
    LikePost(PostAction),
    UnlikePost(PostAction),
    SavePost(PostAction),
    UnsavePost(PostAction),
    AddComment(NewComment),
    SubscribeCommunity(SubscriptionChange),
    UnsubscribeCommunity(SubscriptionChange),
}

impl OpPayload {
    /// Like a post.
    pub fn like_post(post_id: i64, user_id: impl Into<String>) -> Self {
        OpPayload::LikePost(PostAction {
            post_id,
            user_id: user_id.into(),
        })
    }

    /// Remove a like from a post.
    pub fn unlike_post(post_id: i64, user_id: impl Into<String>) -> Self {
        OpPayload::UnlikePost(PostAction {
            post_id,
            user_id: user_id.into(),
        })
    }

    /// Bookmark a post.
    pub fn save_post(post_id: i64, user_id: impl Into<String>) -> Self {
        OpPayload::SavePost(PostAction {
            post_id,
            user_id: user_id.into(),
        })
    }

    /// Remove a bookmark.
    pub fn unsave_post(post_id: i64, user_id: impl Into<String>) -> Self {
        OpPayload::UnsavePost(PostAction {
            post_id,
            user_id: user_id.into(),
        })
    }

    /// Comment on a post.
    pub fn add_comment(post_id: i64, user_id: impl Into<String>, content: impl Into<String>) -> Self {
        OpPayload::AddComment(NewComment {
            post_id,
            user_id: user_id.into(),
            content: content.into(),
        })
    }

    /// Returns the kind tag of this payload.
    pub fn kind(&self) -> OpKind {
        match self {
            OpPayload::CreatePost(_) => OpKind::CreatePost,
            OpPayload::CreateCommunity(_) => OpKind::CreateCommunity,
            OpPayload::LikePost(_) => OpKind::LikePost,
            OpPayload::UnlikePost(_) => OpKind::UnlikePost,
            OpPayload::SavePost(_) => OpKind::SavePost,
            OpPayload::UnsavePost(_) => OpKind::UnsavePost,
            OpPayload::AddComment(_) => OpKind::AddComment,
            OpPayload::SubscribeCommunity(_) => OpKind::SubscribeCommunity,
            OpPayload::UnsubscribeCommunity(_) => OpKind::UnsubscribeCommunity,
        }
    }

    /// Serializes the inner payload struct (without the kind tag).
    pub fn to_json(&self) -> Result<Value> {
        let value = match self {
            OpPayload::CreatePost(p) => serde_json::to_value(p)?,
            OpPayload::CreateCommunity(p) => serde_json::to_value(p)?,
            OpPayload::LikePost(p)
            | OpPayload::UnlikePost(p)
            | OpPayload::SavePost(p)
            | OpPayload::UnsavePost(p) => serde_json::to_value(p)?,
            OpPayload::AddComment(p) => serde_json::to_value(p)?,
            OpPayload::SubscribeCommunity(p) | OpPayload::UnsubscribeCommunity(p) => {
                serde_json::to_value(p)?
            }
        };
        Ok(value)
    }

    /// Decodes a raw payload for the given kind.
    pub fn from_json(kind: OpKind, value: Value) -> Result<Self> {
        let invalid = |source| Error::InvalidPayload {
            kind: kind.as_str().to_string(),
            source,
        };
        let payload = match kind {
            OpKind::CreatePost => OpPayload::CreatePost(serde_json::from_value(value).map_err(invalid)?),
            OpKind::CreateCommunity => {
                OpPayload::CreateCommunity(serde_json::from_value(value).map_err(invalid)?)
            }
            OpKind::LikePost => OpPayload::LikePost(serde_json::from_value(value).map_err(invalid)?),
            OpKind::UnlikePost => OpPayload::UnlikePost(serde_json::from_value(value).map_err(invalid)?),
            OpKind::SavePost => OpPayload::SavePost(serde_json::from_value(value).map_err(invalid)?),
            OpKind::UnsavePost => OpPayload::UnsavePost(serde_json::from_value(value).map_err(invalid)?),
            OpKind::AddComment => OpPayload::AddComment(serde_json::from_value(value).map_err(invalid)?),
            OpKind::SubscribeCommunity => {
                OpPayload::SubscribeCommunity(serde_json::from_value(value).map_err(invalid)?)
            }
            OpKind::UnsubscribeCommunity => {
                OpPayload::UnsubscribeCommunity(serde_json::from_value(value).map_err(invalid)?)
            }
        };
        Ok(payload)
    }
}

/// A user mutation awaiting replay against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedOp {
    /// Caller-supplied identifier, typically derived from the enqueue time.
    pub id: String,
    /// The mutation to replay.
    pub payload: OpPayload,
    /// Enqueue time in milliseconds since Unix epoch. Informational only.
    pub created_at: u64,
}

impl QueuedOp {
    /// Creates a new queued operation.
    pub fn new(id: impl Into<String>, payload: OpPayload, created_at: u64) -> Self {
        QueuedOp {
            id: id.into(),
            payload,
            created_at,
        }
    }

    /// Returns the kind of this operation.
    pub fn kind(&self) -> OpKind {
        self.payload.kind()
    }

    /// Converts to the persisted wire form.
    pub fn to_entry(&self) -> Result<QueueEntry> {
        Ok(QueueEntry {
            id: self.id.clone(),
            kind: self.kind().as_str().to_string(),
            payload: self.payload.to_json()?,
            created_at: self.created_at,
        })
    }
}

/// Persisted form of a queued operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub created_at: u64,
}

impl QueueEntry {
    /// Decodes the entry into a typed operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOperation`] if the type tag is not one of the
    /// known kinds, or [`Error::InvalidPayload`] if the payload does not
    /// match the kind's shape.
    pub fn decode(&self) -> Result<QueuedOp> {
        let kind: OpKind = self.kind.parse()?;
        let payload = OpPayload::from_json(kind, self.payload.clone())?;
        Ok(QueuedOp {
            id: self.id.clone(),
            payload,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
#[path = "op_tests.rs"]
mod tests;
