// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashSet;
use std::io::Write;
use std::str::FromStr;

use serde_json::Value;

use feed_core::{OpKind, OpPayload, QueueEntry, QueuedOp};
use feed_offline::persist_payload_image;

use crate::error::{Error, Result};

use super::{format_millis, Context};

pub fn list(ctx: &Context, json: bool, out: &mut dyn Write) -> Result<()> {
    let entries = ctx.queue().peek()?;
    if json {
        for entry in &entries {
            // One entry per line (JSONL)
            writeln!(out, "{}", serde_json::to_string(entry)?)?;
        }
        return Ok(());
    }
    if entries.is_empty() {
        writeln!(out, "No queued writes")?;
        return Ok(());
    }
    for entry in &entries {
        writeln!(out, "{}", format_entry(entry))?;
    }
    Ok(())
}

fn format_entry(entry: &QueueEntry) -> String {
    let marker = match entry.decode() {
        Ok(_) => "",
        Err(_) => " (undecodable)",
    };
    format!(
        "{}  {}  {}{}  {}",
        entry.id,
        format_millis(entry.created_at),
        entry.kind,
        marker,
        entry.payload
    )
}

pub fn count(ctx: &Context, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", ctx.queue().len()?)?;
    Ok(())
}

pub fn clear(ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let queue = ctx.queue();
    let dropped = queue.len()?;
    queue.clear()?;
    tracing::info!(dropped, "cleared offline queue");
    writeln!(out, "Dropped {dropped} queued write(s)")?;
    Ok(())
}

/// Validates and queues a write, copying any attached image into the
/// state directory first.
pub fn push(ctx: &Context, kind: &str, payload: &str, out: &mut dyn Write) -> Result<()> {
    let kind = OpKind::from_str(kind)?;
    let value: Value = serde_json::from_str(payload).map_err(Error::PayloadJson)?;
    let mut payload = OpPayload::from_json(kind, value)?;
    persist_payload_image(&mut payload, &ctx.state.image_dir(), ctx.clock.as_ref());

    let queue = ctx.queue();
    let now = ctx.clock.now_ms();
    let op = QueuedOp::new(next_id(&queue.peek()?, now), payload, now);
    queue.enqueue(&op)?;
    writeln!(out, "Queued {} {}", op.kind(), op.id)?;
    Ok(())
}

/// Returns `{now}-{seq}` with the lowest `seq` not already queued, so
/// pushes within one millisecond stay distinct.
fn next_id(queued: &[QueueEntry], now: u64) -> String {
    let taken: HashSet<&str> = queued.iter().map(|entry| entry.id.as_str()).collect();
    let mut seq = 0u64;
    loop {
        let id = format!("{now}-{seq}");
        if !taken.contains(id.as_str()) {
            return id;
        }
        seq += 1;
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
