// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Runs the binary against `state` with no ambient configuration.
pub fn feedsync(state: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("feedsync");
    cmd.env_remove("RUST_LOG")
        .env_remove("FEEDSYNC_STATE_DIR")
        .arg("--state-dir")
        .arg(state.path());
    cmd
}

/// Queues a write and asserts success.
pub fn push(state: &TempDir, kind: &str, payload: &str) {
    feedsync(state)
        .args(["queue", "push", kind, payload])
        .assert()
        .success();
}

/// Writes `config.toml` into the state directory.
pub fn write_config(state: &TempDir, content: &str) {
    std::fs::write(state.path().join("config.toml"), content).unwrap();
}
