// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use feed_offline::{Connectivity, DeliveryMode, TcpProbe};

use crate::error::Result;

use super::Context;

/// Snapshot printed by `feedsync status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub online: bool,
    pub probe_addr: String,
    pub queued: usize,
    pub delivery: DeliveryMode,
    pub call_timeout_ms: Option<u64>,
}

pub fn run(ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let probe = TcpProbe::new(ctx.config.probe_addr()?, ctx.config.probe_timeout());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let status = runtime.block_on(collect(ctx, &probe))?;

    let network = if status.online { "online" } else { "offline" };
    writeln!(out, "network:  {network} (probe {})", status.probe_addr)?;
    writeln!(out, "queued:   {}", status.queued)?;
    writeln!(out, "delivery: {}", status.delivery)?;
    if let Some(ms) = status.call_timeout_ms {
        writeln!(out, "timeout:  {ms} ms")?;
    }
    Ok(())
}

/// Probes connectivity and reads the queue length.
pub async fn collect(ctx: &Context, connectivity: &dyn Connectivity) -> Result<Status> {
    let online = connectivity.network_state().await.is_connected;
    let queued = ctx.queue().len()?;
    let sync = ctx.config.sync_config();
    Ok(Status {
        online,
        probe_addr: ctx.config.probe_addr.clone(),
        queued,
        delivery: sync.delivery,
        call_timeout_ms: sync.call_timeout.map(|d| d.as_millis() as u64),
    })
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
