// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cache key namespace and TTL policy.
//!
//! Invalidation matches keys exactly, so a repository that clears a key
//! must build it with the same function the reader used to populate it.

/// Builders for every cache key used by the feed repositories.
pub struct CacheKey;

impl CacheKey {
    pub fn user(id: &str) -> String {
        format!("user:{id}")
    }

    /// All communities, or a search over them. Searches are case-insensitive.
    pub fn communities(search: Option<&str>) -> String {
        match search {
            Some(term) if !term.is_empty() => {
                format!("communities:search:{}", term.to_lowercase())
            }
            _ => "communities:all".to_string(),
        }
    }

    pub fn community(id: i64) -> String {
        format!("community:{id}")
    }

    pub fn communities_by_user(user_id: &str) -> String {
        format!("communities:user:{user_id}")
    }

    pub fn communities_by_subscriber(user_id: &str) -> String {
        format!("communities:subscriber:{user_id}")
    }

    pub fn feed_by_user(user_id: &str, page: u32) -> String {
        format!("feed:user:{user_id}:page:{page}")
    }

    pub fn feed_by_following(user_id: &str, page: u32) -> String {
        format!("feed:following:{user_id}:page:{page}")
    }

    pub fn posts_by_community(community_id: i64, page: u32) -> String {
        format!("posts:community:{community_id}:page:{page}")
    }

    pub fn posts_by_user(user_id: &str, page: u32) -> String {
        format!("posts:user:{user_id}:page:{page}")
    }

    pub fn comments_by_post(post_id: i64) -> String {
        format!("comments:post:{post_id}")
    }

    pub fn saved_posts_by_user(user_id: &str, page: u32) -> String {
        format!("saved_posts:user:{user_id}:page:{page}")
    }

    pub fn topics() -> String {
        "topics:all".to_string()
    }

    pub fn topic(id: i64) -> String {
        format!("topic:{id}")
    }

    pub fn popular_topics(limit: u32) -> String {
        format!("topics:popular:{limit}")
    }
}

const MINUTE_MS: u64 = 60 * 1000;

/// Time-to-live per kind of cached collection, in milliseconds.
pub struct CacheTtl;

impl CacheTtl {
    pub const DEFAULT: u64 = 5 * MINUTE_MS;
    pub const FEED: u64 = 2 * MINUTE_MS;
    pub const COMMENTS: u64 = 2 * MINUTE_MS;
    pub const COMMUNITIES: u64 = 10 * MINUTE_MS;
    pub const PROFILES: u64 = 10 * MINUTE_MS;
    pub const SAVED_POSTS: u64 = 2 * MINUTE_MS;
    pub const TOPICS: u64 = 30 * MINUTE_MS;
}

#[cfg(test)]
#[path = "cache_key_tests.rs"]
mod tests;
