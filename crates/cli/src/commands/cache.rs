// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use feed_offline::QUEUE_KEY;

use crate::error::{Error, Result};

use super::{format_millis, Context};

/// Prints the entry under `key` with its freshness, then the value.
pub fn show(ctx: &Context, key: &str, allow_expired: bool, out: &mut dyn Write) -> Result<()> {
    let cache = ctx.cache();
    let entry = cache
        .entry(key)?
        .ok_or_else(|| Error::CacheMiss(key.to_string()))?;
    let fresh = entry.is_fresh(cache.now_ms());
    if !fresh && !allow_expired {
        return Err(Error::CacheExpired(key.to_string()));
    }

    writeln!(out, "key:      {key}")?;
    writeln!(out, "written:  {}", format_millis(entry.written_at))?;
    writeln!(out, "ttl:      {} ms", entry.ttl_ms)?;
    writeln!(out, "state:    {}", if fresh { "fresh" } else { "expired" })?;
    writeln!(out, "{}", serde_json::to_string_pretty(&entry.value)?)?;
    Ok(())
}

pub fn clear(ctx: &Context, key: &str, out: &mut dyn Write) -> Result<()> {
    ctx.cache().clear_cache(key)?;
    writeln!(out, "Cleared {key}")?;
    Ok(())
}

/// Lists cache keys in sorted order. The queue record shares the store and
/// is left out.
pub fn keys(ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let mut keys: Vec<String> = ctx
        .store
        .keys()?
        .into_iter()
        .filter(|k| k != QUEUE_KEY)
        .collect();
    keys.sort();
    for key in keys {
        writeln!(out, "{key}")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
