// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for sync passes.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::connectivity::StaticConnectivity;
use crate::error::RemoteError;
use crate::test_helpers::{make_test_op, memory_store, Call, RecordingBackend};
use feed_core::KvStore;
use std::sync::Mutex;

struct Fixture {
    queue: Arc<QueueStore>,
    connectivity: Arc<StaticConnectivity>,
    store: Arc<dyn KvStore>,
}

impl Fixture {
    fn new(online: bool) -> Self {
        let store = memory_store();
        Fixture {
            queue: Arc::new(QueueStore::new(store.clone())),
            connectivity: Arc::new(StaticConnectivity::new(online)),
            store,
        }
    }

    fn with_ops(online: bool, ns: &[u64]) -> Self {
        let fixture = Self::new(online);
        for &n in ns {
            fixture.queue.enqueue(&make_test_op(n)).unwrap();
        }
        fixture
    }

    fn manager(&self, config: SyncConfig) -> SyncManager {
        SyncManager::with_config(self.queue.clone(), self.connectivity.clone(), config)
    }

    fn queued_ids(&self) -> Vec<String> {
        self.queue.peek().unwrap().into_iter().map(|e| e.id).collect()
    }
}

fn at_least_once() -> SyncConfig {
    SyncConfig {
        delivery: DeliveryMode::AtLeastOnce,
        ..SyncConfig::default()
    }
}

#[test]
fn test_new_uses_default_config() {
    let fixture = Fixture::new(true);
    let manager = SyncManager::new(fixture.queue.clone(), fixture.connectivity.clone());

    assert_eq!(manager.config().delivery, DeliveryMode::AtMostOnce);
    assert_eq!(manager.config().call_timeout, None);
}

#[tokio::test]
async fn test_drains_in_enqueue_order() {
    let fixture = Fixture::with_ops(true, &[5, 3, 9, 1]);
    let manager = fixture.manager(SyncConfig::default());
    let seen = Mutex::new(Vec::new());

    let report = manager
        .sync_queued_writes(|entry| {
            seen.lock().unwrap().push(entry.id);
            async { Ok::<(), Error>(()) }
        })
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["5", "3", "9", "1"]);
    assert_eq!(report, SyncReport { synced: 4, remaining: 0 });
    assert!(fixture.queue.peek().unwrap().is_empty());
}

#[tokio::test]
async fn test_offline_pass_is_a_no_op() {
    let fixture = Fixture::with_ops(false, &[1, 2, 3]);
    let manager = fixture.manager(SyncConfig::default());
    let mut invoked = false;

    let report = manager
        .sync_queued_writes(|_| {
            invoked = true;
            async { Ok::<(), Error>(()) }
        })
        .await
        .unwrap();

    assert!(!invoked);
    assert_eq!(report, SyncReport { synced: 0, remaining: 3 });
    assert_eq!(fixture.queued_ids(), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_empty_queue_online() {
    let fixture = Fixture::new(true);
    let backend = RecordingBackend::new();

    let report = fixture
        .manager(SyncConfig::default())
        .sync_with(&backend.repositories())
        .await
        .unwrap();

    assert_eq!(report, SyncReport { synced: 0, remaining: 0 });
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_stops_on_first_failure_and_drops_failed_entry() {
    let fixture = Fixture::with_ops(true, &[1, 2, 3]);
    let backend = RecordingBackend::new();
    backend.fail_post(2);

    let err = fixture
        .manager(SyncConfig::default())
        .sync_with(&backend.repositories())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Remote(RemoteError::Unreachable(_))));
    assert_eq!(
        backend.calls(),
        vec![Call::LikePost(1, "u1".into()), Call::LikePost(2, "u1".into())]
    );
    assert_eq!(fixture.queued_ids(), vec!["3"]);
}

#[tokio::test]
async fn test_later_pass_picks_up_leftovers() {
    let fixture = Fixture::with_ops(true, &[1, 2, 3]);
    let backend = RecordingBackend::new();
    backend.fail_post(2);
    let manager = fixture.manager(SyncConfig::default());
    let repos = backend.repositories();

    assert!(manager.sync_with(&repos).await.is_err());
    let report = manager.sync_with(&repos).await.unwrap();

    assert_eq!(report, SyncReport { synced: 1, remaining: 0 });
    assert_eq!(backend.calls().last(), Some(&Call::LikePost(3, "u1".into())));
}

#[tokio::test]
async fn test_unknown_entry_is_removed_and_reported() {
    let fixture = Fixture::new(true);
    fixture
        .store
        .set(
            crate::queue::QUEUE_KEY,
            r#"[{"id":"1","type":"pin_post","payload":{},"createdAt":1}]"#,
        )
        .unwrap();
    fixture.queue.enqueue(&make_test_op(2)).unwrap();
    let backend = RecordingBackend::new();

    let err = fixture
        .manager(SyncConfig::default())
        .sync_with(&backend.repositories())
        .await
        .unwrap_err();

    assert!(!err.is_retryable());
    assert!(backend.calls().is_empty());
    assert_eq!(fixture.queued_ids(), vec!["2"]);
}

#[tokio::test]
async fn test_at_least_once_keeps_failed_entry_at_front() {
    let fixture = Fixture::with_ops(true, &[1, 2, 3]);
    let backend = RecordingBackend::new();
    backend.fail_post(2);

    let err = fixture
        .manager(at_least_once())
        .sync_with(&backend.repositories())
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(fixture.queued_ids(), vec!["2", "3"]);
}

#[tokio::test]
async fn test_at_least_once_backend_down_loses_nothing() {
    let fixture = Fixture::with_ops(true, &[1, 2, 3]);
    let backend = RecordingBackend::new();
    backend.fail_everything();
    let manager = fixture.manager(at_least_once());
    let repos = backend.repositories();

    for _ in 0..3 {
        assert!(manager.sync_with(&repos).await.is_err());
    }

    assert_eq!(fixture.queued_ids(), vec!["1", "2", "3"]);
    assert_eq!(backend.calls().len(), 3);
}

#[tokio::test]
async fn test_at_least_once_drops_unprocessable_entry() {
    let fixture = Fixture::new(true);
    fixture
        .store
        .set(
            crate::queue::QUEUE_KEY,
            r#"[{"id":"1","type":"like_post","payload":{"postId":"x"},"createdAt":1}]"#,
        )
        .unwrap();
    fixture.queue.enqueue(&make_test_op(2)).unwrap();
    let backend = RecordingBackend::new();
    let manager = fixture.manager(at_least_once());
    let repos = backend.repositories();

    let err = manager.sync_with(&repos).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Core(feed_core::Error::InvalidPayload { .. })
    ));
    assert_eq!(fixture.queued_ids(), vec!["2"]);

    let report = manager.sync_with(&repos).await.unwrap();
    assert_eq!(report, SyncReport { synced: 1, remaining: 0 });
}

#[tokio::test]
async fn test_call_timeout_stops_pass() {
    let fixture = Fixture::with_ops(true, &[1, 2]);
    let backend = RecordingBackend::new();
    backend.set_delay(Duration::from_secs(30));
    let config = SyncConfig {
        call_timeout: Some(Duration::from_millis(50)),
        ..at_least_once()
    };

    let err = fixture
        .manager(config)
        .sync_with(&backend.repositories())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout(50)));
    assert!(err.is_retryable());
    assert_eq!(fixture.queued_ids(), vec!["1", "2"]);
}

#[test]
fn test_delivery_mode_serde_names() {
    let mode: DeliveryMode = serde_json::from_str("\"at_least_once\"").unwrap();
    assert_eq!(mode, DeliveryMode::AtLeastOnce);
    assert_eq!(DeliveryMode::default(), DeliveryMode::AtMostOnce);
    for mode in [DeliveryMode::AtMostOnce, DeliveryMode::AtLeastOnce] {
        let json = serde_json::to_string(&mode).unwrap();
        assert_eq!(json, format!("\"{mode}\""));
    }
}
