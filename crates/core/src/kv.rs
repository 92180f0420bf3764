// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable key-value storage.
//!
//! Both the offline write queue (one key holding the whole ordered list)
//! and the read cache (one key per entry) sit on a [`KvStore`]. Backends
//! store opaque strings; callers own the serialization format.
//!
//! - [`FileStore`] - one file per key, atomic replace on every write
//! - [`MemoryStore`] - for tests and mock mode

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Suffix of every record file written by [`FileStore`].
const RECORD_EXT: &str = "json";

/// A string key-value store whose per-key reads and writes are atomic.
pub trait KvStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<()>;

    /// Lists every stored key, in no particular order.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Directory-backed store.
///
/// Each key maps to `<dir>/<hex(key)>.json`. Hex keeps arbitrary keys
/// (`feed:user:u1:page:0`) valid as file names on every platform while
/// staying reversible for [`KvStore::keys`].
///
/// Keys whose hex form would be too long for a file name are stored as
/// `k-<sha256(key)>.json` with the key itself in a `.key`
/// sidecar, so search terms of any length still fit in a file name.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

/// Longest hex stem used directly as a file name.
const MAX_HEX_STEM: usize = 200;

/// Stem prefix of hashed records. Never valid hex.
const HASHED_PREFIX: &str = "k-";

/// Suffix of the sidecar holding a hashed record's key.
const KEY_EXT: &str = "key";

/// Distinguishes temp files written concurrently by this process.
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

impl FileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    fn stem(key: &str) -> Result<String> {
        if key.is_empty() {
            return Err(Error::InvalidKey("key must not be empty".to_string()));
        }
        let stem = hex::encode(key.as_bytes());
        if stem.len() <= MAX_HEX_STEM {
            return Ok(stem);
        }
        Ok(format!(
            "{HASHED_PREFIX}{}",
            hex::encode(Sha256::digest(key.as_bytes()))
        ))
    }

    fn record_path(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{stem}.{RECORD_EXT}"))
    }

    fn key_path(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{stem}.{KEY_EXT}"))
    }

    /// Writes `contents` to `path` through a sibling temp file unique to
    /// this call, then renames it into place.
    fn write_atomic(path: &Path, contents: &str) -> Result<()> {
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = path.with_extension(format!("{}.{seq}.tmp", std::process::id()));
        let written = File::create(&tmp).and_then(|mut file| {
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&tmp, path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn remove_file(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Recovers the key of a record file stem, if the stem is ours.
    fn key_of(&self, stem: &str) -> Result<Option<String>> {
        if stem.starts_with(HASHED_PREFIX) {
            return match fs::read_to_string(self.key_path(stem)) {
                Ok(key) => Ok(Some(key)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            };
        }
        Ok(hex::decode(stem)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok()))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.record_path(&Self::stem(key)?)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let stem = Self::stem(key)?;
        // The sidecar lands first so a listed record always has its key
        if stem.starts_with(HASHED_PREFIX) {
            Self::write_atomic(&self.key_path(&stem), key)?;
        }
        Self::write_atomic(&self.record_path(&stem), value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let stem = Self::stem(key)?;
        Self::remove_file(&self.record_path(&stem))?;
        if stem.starts_with(HASHED_PREFIX) {
            Self::remove_file(&self.key_path(&stem))?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for dir_entry in fs::read_dir(&self.dir)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXT) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // Foreign files in the directory are not ours to report
            if let Some(key) = self.key_of(stem)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::InvalidKey("key must not be empty".to_string()));
        }
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries().keys().cloned().collect())
    }
}

#[cfg(test)]
#[path = "kv_tests.rs"]
mod tests;
