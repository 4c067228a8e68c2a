// Integration tests for the attempt store
//
// These tests verify append-only recording, duplicate rejection,
// windowed statistics, and replay from an existing file.

use anyhow::Result;
use chrono::{Duration, Utc};
use speech_gateway::{
    AttemptStore, FailureKind, StoreError, TranscriptionAttempt, TranscriptionOutcome,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn recognized(text: &str) -> TranscriptionOutcome {
    TranscriptionOutcome::Recognized {
        text: text.to_string(),
    }
}

fn attempt(device_id: &str, outcome: TranscriptionOutcome) -> TranscriptionAttempt {
    TranscriptionAttempt::new(device_id, "audio/clip.wav", "en-US", outcome)
}

fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("attempts.jsonl")
}

#[tokio::test]
async fn test_record_then_statistics_increments_recognized() -> Result<()> {
    let dir = TempDir::new()?;
    let store = AttemptStore::open(store_path(&dir))?;

    let before = store.query_statistics("ESP32_001", 7).await?;
    assert_eq!(before.recognized, 0);

    store
        .record(attempt("ESP32_001", recognized("turn on the light")))
        .await?;

    let after = store.query_statistics("ESP32_001", 7).await?;
    assert_eq!(after.recognized, before.recognized + 1);
    assert_eq!(after.total(), 1);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_id_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let store = AttemptStore::open(store_path(&dir))?;

    let first = attempt("ESP32_001", recognized("hello"));
    let id = first.id;

    store.record(first.clone()).await?;

    // Replaying the same attempt must not create a second row
    let err = store.record(first).await.unwrap_err();
    match err {
        StoreError::Duplicate { id: dup } => assert_eq!(dup, id),
        other => panic!("Expected Duplicate, got {:?}", other),
    }

    assert_eq!(store.len().await, 1);

    Ok(())
}

#[tokio::test]
async fn test_window_zero_spans_exactly_one_trailing_day() -> Result<()> {
    let dir = TempDir::new()?;
    let store = AttemptStore::open(store_path(&dir))?;

    let mut inside = attempt("ESP32_001", recognized("still counted"));
    inside.created_at = Utc::now() - Duration::hours(23);

    // Exactly on the boundary: the cutoff is inclusive, and the query's
    // own `now` is taken after this timestamp, so 24h-old stays inside
    let mut boundary = attempt("ESP32_001", recognized("exactly a day old"));
    boundary.created_at = Utc::now() - Duration::hours(24);

    let mut outside = attempt("ESP32_001", recognized("too old"));
    outside.created_at = Utc::now() - Duration::hours(25);

    store.record(inside).await?;
    store.record(boundary).await?;
    store.record(outside).await?;

    let stats = store.query_statistics("ESP32_001", 0).await?;
    assert_eq!(
        stats.recognized, 2,
        "Attempts up to and including 24h old count"
    );

    // A wider window picks up all three
    let stats = store.query_statistics("ESP32_001", 2).await?;
    assert_eq!(stats.recognized, 3);

    Ok(())
}

#[tokio::test]
async fn test_seven_day_device_scenario() -> Result<()> {
    let dir = TempDir::new()?;
    let store = AttemptStore::open(store_path(&dir))?;

    store
        .record(attempt("ESP32_001", recognized("tell me a story")))
        .await?;
    store
        .record(attempt("ESP32_001", recognized("sing a song")))
        .await?;
    store
        .record(attempt("ESP32_001", TranscriptionOutcome::NoMatch))
        .await?;

    // Another device must not leak into the counts
    store
        .record(attempt("ESP32_002", recognized("unrelated")))
        .await?;

    let stats = store.query_statistics("ESP32_001", 7).await?;
    assert_eq!(stats.recognized, 2);
    assert_eq!(stats.no_match, 1);
    assert_eq!(stats.canceled, 0);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.total(), 3);

    Ok(())
}

#[tokio::test]
async fn test_unknown_device_returns_zero_stats() -> Result<()> {
    let dir = TempDir::new()?;
    let store = AttemptStore::open(store_path(&dir))?;

    let stats = store.query_statistics("X", 30).await?;
    assert_eq!(stats.total(), 0);
    assert_eq!(stats.recognized, 0);
    assert_eq!(stats.no_match, 0);
    assert_eq!(stats.canceled, 0);
    assert_eq!(stats.failed, 0);

    Ok(())
}

#[tokio::test]
async fn test_huge_window_spans_everything_without_panic() -> Result<()> {
    let dir = TempDir::new()?;
    let store = AttemptStore::open(store_path(&dir))?;

    let stats = store.query_statistics("X", u32::MAX).await?;
    assert_eq!(stats.total(), 0);

    let mut old = attempt("ESP32_001", recognized("ancient"));
    old.created_at = Utc::now() - Duration::days(3650);
    store.record(old).await?;

    let stats = store.query_statistics("ESP32_001", u32::MAX).await?;
    assert_eq!(stats.recognized, 1);

    Ok(())
}

#[tokio::test]
async fn test_canceled_and_failed_outcomes_are_counted() -> Result<()> {
    let dir = TempDir::new()?;
    let store = AttemptStore::open(store_path(&dir))?;

    store
        .record(attempt(
            "ESP32_001",
            TranscriptionOutcome::Canceled {
                reason: "quota exceeded".to_string(),
            },
        ))
        .await?;
    store
        .record(attempt(
            "ESP32_001",
            TranscriptionOutcome::Failed {
                error_kind: FailureKind::NetworkError,
            },
        ))
        .await?;

    let stats = store.query_statistics("ESP32_001", 7).await?;
    assert_eq!(stats.canceled, 1);
    assert_eq!(stats.failed, 1);

    Ok(())
}

#[tokio::test]
async fn test_reopen_replays_rows_and_keeps_dedup() -> Result<()> {
    let dir = TempDir::new()?;
    let path = store_path(&dir);

    let recorded = attempt("ESP32_001", recognized("persisted"));
    {
        let store = AttemptStore::open(&path)?;
        store.record(recorded.clone()).await?;
        store
            .record(attempt("ESP32_001", TranscriptionOutcome::NoMatch))
            .await?;
    }

    let reopened = AttemptStore::open(&path)?;
    assert_eq!(reopened.len().await, 2);

    let stats = reopened.query_statistics("ESP32_001", 7).await?;
    assert_eq!(stats.recognized, 1);
    assert_eq!(stats.no_match, 1);

    // Duplicate detection survives the reopen
    let err = reopened.record(recorded).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate { .. }));
    assert_eq!(reopened.len().await, 2);

    Ok(())
}

#[tokio::test]
async fn test_attempts_for_device_preserves_order() -> Result<()> {
    let dir = TempDir::new()?;
    let store = AttemptStore::open(store_path(&dir))?;

    store.record(attempt("ESP32_001", recognized("one"))).await?;
    store.record(attempt("ESP32_001", recognized("two"))).await?;
    store.record(attempt("ESP32_002", recognized("other"))).await?;

    let attempts = store.attempts_for_device("ESP32_001").await;
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0].outcome, recognized("one"));
    assert_eq!(attempts[1].outcome, recognized("two"));

    Ok(())
}
