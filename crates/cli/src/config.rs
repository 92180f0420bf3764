// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! State directory and configuration.
//!
//! Everything feedsync touches lives under one state directory
//! (`$XDG_DATA_HOME/feedsync` by default):
//!
//! - `config.toml`: optional settings, see [`Config`]
//! - `store/`: key-value records for the offline queue and the read cache
//! - `offline-images/`: durable copies of images attached to queued writes

use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use feed_offline::{DeliveryMode, SyncConfig, OFFLINE_IMAGE_DIR};

use crate::error::{Error, Result};

const STATE_DIR_NAME: &str = "feedsync";
const CONFIG_FILE_NAME: &str = "config.toml";
const STORE_DIR_NAME: &str = "store";

/// Settings read from `config.toml`. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address dialed to decide whether the network is reachable.
    pub probe_addr: String,
    /// How long the reachability probe may take, in milliseconds.
    pub probe_timeout_ms: u64,
    /// Delivery semantics for sync passes.
    pub delivery: DeliveryMode,
    /// Upper bound on each replayed repository call, in milliseconds.
    pub call_timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            probe_addr: "1.1.1.1:443".to_string(),
            probe_timeout_ms: 2_000,
            delivery: DeliveryMode::default(),
            call_timeout_ms: None,
        }
    }
}

impl Config {
    /// Loads `config.toml` from `state_dir`, or the defaults if it is absent.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let path = state_dir.join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e.into()),
        };
        let config: Config = toml::from_str(&content)?;
        config.probe_addr()?;
        Ok(config)
    }

    /// Parsed probe address.
    pub fn probe_addr(&self) -> Result<SocketAddr> {
        self.probe_addr.parse().map_err(|e| {
            Error::Config(format!("invalid probe_addr '{}': {e}", self.probe_addr))
        })
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Sync pass settings derived from this configuration.
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            delivery: self.delivery,
            call_timeout: self.call_timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Returns the default state directory.
pub fn default_state_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join(STATE_DIR_NAME))
        .ok_or_else(|| Error::Config("cannot determine local data directory".to_string()))
}

/// Paths inside a state directory.
#[derive(Debug, Clone)]
pub struct StateDir {
    root: PathBuf,
}

impl StateDir {
    /// Uses `root` if given, else [`default_state_dir`]. Creates it if needed.
    pub fn resolve(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => default_state_dir()?,
        };
        fs::create_dir_all(&root)?;
        Ok(StateDir { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store_dir(&self) -> PathBuf {
        self.root.join(STORE_DIR_NAME)
    }

    pub fn image_dir(&self) -> PathBuf {
        self.root.join(OFFLINE_IMAGE_DIR)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
