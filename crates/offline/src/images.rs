// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable copies of images attached to queued writes.
//!
//! Image pickers hand out temporary files that may be gone by the time a
//! queued `create_post` is replayed. Before queueing, the image is copied
//! into an app-owned directory and the queued payload refers to the copy.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use feed_core::{ClockSource, OpPayload};

/// Name of the directory holding persisted images.
pub const OFFLINE_IMAGE_DIR: &str = "offline-images";

const FILE_SCHEME: &str = "file://";

/// Copies the image at `uri` into `dir` and returns the uri of the copy.
///
/// Empty uris and uris already inside `dir` are returned unchanged. This
/// never fails: if the copy cannot be made the original uri is returned and
/// the replayed write will use it as-is.
pub fn persist_offline_image(uri: &str, dir: &Path, clock: &dyn ClockSource) -> String {
    if uri.is_empty() {
        return String::new();
    }
    let (scheme, source) = match uri.strip_prefix(FILE_SCHEME) {
        Some(path) => (FILE_SCHEME, path),
        None => ("", uri),
    };
    let source = Path::new(source.split('?').next().unwrap_or(source));
    if source.starts_with(dir) {
        return uri.to_string();
    }

    match copy_into(source, uri, dir, clock) {
        Ok(destination) => {
            tracing::debug!(from = uri, to = %destination, "persisted offline image");
            format!("{scheme}{destination}")
        }
        Err(e) => {
            tracing::warn!(uri, error = %e, "could not persist offline image, keeping original");
            uri.to_string()
        }
    }
}

/// Replaces the image uri of a `create_post` / `create_community` payload
/// with a durable copy. Other payloads are left alone.
pub fn persist_payload_image(payload: &mut OpPayload, dir: &Path, clock: &dyn ClockSource) {
    let image_uri = match payload {
        OpPayload::CreatePost(p) => &mut p.image_uri,
        OpPayload::CreateCommunity(c) => &mut c.image_uri,
        _ => return,
    };
    if let Some(uri) = image_uri.as_mut() {
        let persisted = persist_offline_image(uri, dir, clock);
        *uri = persisted;
    }
}

fn copy_into(
    source: &Path,
    uri: &str,
    dir: &Path,
    clock: &dyn ClockSource,
) -> std::io::Result<String> {
    fs::create_dir_all(dir)?;
    let now = clock.now_ms();
    let mut name = format!("{now}-{}", suffix(uri, now));
    if let Some(ext) = normalized_extension(uri) {
        name.push('.');
        name.push_str(&ext);
    }
    let destination = dir.join(name);
    fs::copy(source, &destination)?;
    Ok(destination.to_string_lossy().into_owned())
}

/// Short content-independent tag separating copies made in the same millisecond.
fn suffix(uri: &str, now_ms: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(uri.as_bytes());
    hasher.update(now_ms.to_be_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..10].to_string()
}

/// Lowercased extension of `uri`, ignoring any query string, with `jpeg`
/// folded into `jpg`.
fn normalized_extension(uri: &str) -> Option<String> {
    let path = uri.split('?').next().unwrap_or(uri);
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    let ext = ext.to_ascii_lowercase();
    Some(if ext == "jpeg" { "jpg".to_string() } else { ext })
}

#[cfg(test)]
#[path = "images_tests.rs"]
mod tests;
