// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Network reachability.
//!
//! Both the sync manager and the cache-first reader consult a
//! [`Connectivity`] before touching the network.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::net::TcpStream;

/// Snapshot of the device's network reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkState {
    pub is_connected: bool,
}

impl NetworkState {
    pub const ONLINE: NetworkState = NetworkState { is_connected: true };
    pub const OFFLINE: NetworkState = NetworkState {
        is_connected: false,
    };
}

/// Reports current network reachability.
pub trait Connectivity: Send + Sync {
    fn network_state(&self) -> Pin<Box<dyn Future<Output = NetworkState> + Send + '_>>;
}

/// Connectivity that reports whatever it was last told.
///
/// Used in mock mode (always online) and in tests.
#[derive(Debug)]
pub struct StaticConnectivity {
    connected: AtomicBool,
}

impl StaticConnectivity {
    pub fn new(connected: bool) -> Self {
        StaticConnectivity {
            connected: AtomicBool::new(connected),
        }
    }

    pub fn online() -> Self {
        Self::new(true)
    }

    pub fn offline() -> Self {
        Self::new(false)
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Release);
    }
}

impl Connectivity for StaticConnectivity {
    fn network_state(&self) -> Pin<Box<dyn Future<Output = NetworkState> + Send + '_>> {
        let is_connected = self.connected.load(Ordering::Acquire);
        Box::pin(async move { NetworkState { is_connected } })
    }
}

/// Connectivity probed by opening a TCP connection.
///
/// The device counts as online when a connection to `addr` is established
/// within `timeout`. The connection is dropped immediately.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: SocketAddr,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(addr: SocketAddr, timeout: Duration) -> Self {
        TcpProbe { addr, timeout }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Connectivity for TcpProbe {
    fn network_state(&self) -> Pin<Box<dyn Future<Output = NetworkState> + Send + '_>> {
        Box::pin(async move {
            let attempt = tokio::time::timeout(self.timeout, TcpStream::connect(self.addr)).await;
            let is_connected = matches!(attempt, Ok(Ok(_)));
            tracing::debug!(addr = %self.addr, is_connected, "connectivity probe");
            NetworkState { is_connected }
        })
    }
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
