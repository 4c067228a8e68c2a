use super::attempt::TranscriptionAttempt;
use super::error::StoreError;
use super::stats::OutcomeStats;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

struct StoreInner {
    writer: BufWriter<File>,
    attempts: Vec<TranscriptionAttempt>,
    ids: HashSet<Uuid>,
}

/// Append-only attempt store
///
/// One JSON object per line in a single file. On open the file is
/// replayed into memory, so duplicate detection and statistics queries
/// never touch the disk again; every `record` appends and flushes one
/// line before returning.
///
/// Writes are serialized by the inner mutex. Queries take the same lock
/// briefly, so a reader sees either none or all of a record, never a
/// partial row.
pub struct AttemptStore {
    path: PathBuf,
    inner: Mutex<StoreInner>,
}

impl AttemptStore {
    /// Open (or create) the store file at `path` and replay its rows.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut attempts = Vec::new();
        let mut ids = HashSet::new();

        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            for (line_no, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<TranscriptionAttempt>(&line) {
                    Ok(attempt) => {
                        if ids.insert(attempt.id) {
                            attempts.push(attempt);
                        } else {
                            warn!("Skipping duplicate id on line {}", line_no + 1);
                        }
                    }
                    Err(e) => {
                        warn!("Skipping malformed row on line {}: {}", line_no + 1, e);
                    }
                }
            }
            info!("Replayed {} attempts from {}", attempts.len(), path.display());
        }

        let writer = BufWriter::new(OpenOptions::new().create(true).append(true).open(&path)?);

        Ok(Self {
            path,
            inner: Mutex::new(StoreInner {
                writer,
                attempts,
                ids,
            }),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one attempt.
    ///
    /// A second call with the same id fails with [`StoreError::Duplicate`]
    /// and leaves the first row untouched. On a write failure nothing is
    /// admitted to the in-memory state either.
    pub async fn record(&self, attempt: TranscriptionAttempt) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;

        if inner.ids.contains(&attempt.id) {
            return Err(StoreError::Duplicate { id: attempt.id });
        }

        let line = serde_json::to_string(&attempt)?;
        inner.writer.write_all(line.as_bytes())?;
        inner.writer.write_all(b"\n")?;
        inner.writer.flush()?;

        inner.ids.insert(attempt.id);
        inner.attempts.push(attempt);

        Ok(())
    }

    /// Count attempts by outcome kind for one device over a trailing
    /// window.
    ///
    /// `window_days = 0` means the trailing day: an attempt exactly 24h
    /// old is still counted, anything older is not. No matching data
    /// yields all-zero counts, never an error.
    pub async fn query_statistics(
        &self,
        device_id: &str,
        window_days: u32,
    ) -> Result<OutcomeStats, StoreError> {
        let cutoff = window_cutoff(Utc::now(), window_days);
        let inner = self.inner.lock().await;

        let mut stats = OutcomeStats::default();
        for attempt in inner
            .attempts
            .iter()
            .filter(|a| a.device_id == device_id && a.created_at >= cutoff)
        {
            stats.bump(&attempt.outcome);
        }

        Ok(stats)
    }

    /// All recorded attempts for one device, oldest first
    pub async fn attempts_for_device(&self, device_id: &str) -> Vec<TranscriptionAttempt> {
        let inner = self.inner.lock().await;
        inner
            .attempts
            .iter()
            .filter(|a| a.device_id == device_id)
            .cloned()
            .collect()
    }

    /// Total number of recorded attempts
    pub async fn len(&self) -> usize {
        self.inner.lock().await.attempts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Oldest `created_at` still inside the window.
///
/// A window of 0 days still spans the trailing day; otherwise the
/// boundary sits exactly `window_days` days in the past. A window too
/// large for the timestamp range simply spans everything.
fn window_cutoff(now: DateTime<Utc>, window_days: u32) -> DateTime<Utc> {
    now.checked_sub_signed(Duration::days(i64::from(window_days.max(1))))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_cutoff_zero_spans_one_day() {
        let now = Utc::now();
        assert_eq!(window_cutoff(now, 0), now - Duration::days(1));
        assert_eq!(window_cutoff(now, 1), now - Duration::days(1));
    }

    #[test]
    fn test_window_cutoff_scales_with_days() {
        let now = Utc::now();
        assert_eq!(window_cutoff(now, 7), now - Duration::days(7));
        assert_eq!(window_cutoff(now, 30), now - Duration::days(30));
    }

    #[test]
    fn test_window_cutoff_saturates_on_huge_windows() {
        let now = Utc::now();
        assert_eq!(window_cutoff(now, u32::MAX), DateTime::<Utc>::MIN_UTC);
    }
}
