//! The data-store contract the summary reads its aggregates from.

use crate::types::{StatsError, StatsQuery, SummaryStats};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::{fs, io, thread, time};

/// Read-only aggregate queries over committed swipe decisions.
///
/// Calls may block; each returns a snapshot of committed state at call time, with no
/// consistency guarantee across calls.
pub trait StatsStore: Send + Sync {
    fn total_kept(&self) -> Result<u64, StatsError>;
    fn total_deleted(&self) -> Result<u64, StatsError>;
    /// Bytes reclaimed by deleted items.
    fn space_saved(&self) -> Result<u64, StatsError>;
    fn swipe_score(&self) -> Result<i64, StatsError>;
}

/// In-memory store holding a single snapshot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    stats: Mutex<SummaryStats>,
    failing: Mutex<Option<StatsQuery>>,
    latency: time::Duration,
}

impl MemoryStore {
    pub fn new(stats: SummaryStats) -> Self {
        Self {
            stats: Mutex::new(stats),
            ..Self::default()
        }
    }

    /// Every query sleeps for `latency` before answering.
    pub fn with_latency(mut self, latency: time::Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn set(&self, stats: SummaryStats) {
        *lock(&self.stats) = stats;
    }

    pub fn snapshot(&self) -> SummaryStats {
        *lock(&self.stats)
    }

    /// Make `query` fail until cleared with `None`.
    pub fn fail_on(&self, query: Option<StatsQuery>) {
        *lock(&self.failing) = query;
    }

    fn read<T>(
        &self,
        query: StatsQuery,
        pick: impl FnOnce(&SummaryStats) -> T,
    ) -> Result<T, StatsError> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        if *lock(&self.failing) == Some(query) {
            return Err(StatsError::Query {
                query,
                message: "store unavailable".to_string(),
            });
        }
        Ok(pick(&lock(&self.stats)))
    }
}

impl StatsStore for MemoryStore {
    fn total_kept(&self) -> Result<u64, StatsError> {
        self.read(StatsQuery::TotalKept, |s| s.total_kept)
    }

    fn total_deleted(&self) -> Result<u64, StatsError> {
        self.read(StatsQuery::TotalDeleted, |s| s.total_deleted)
    }

    fn space_saved(&self) -> Result<u64, StatsError> {
        self.read(StatsQuery::SpaceSaved, |s| s.space_saved_bytes)
    }

    fn swipe_score(&self) -> Result<i64, StatsError> {
        self.read(StatsQuery::SwipeScore, |s| s.swipe_score)
    }
}

/// Store backed by a JSON snapshot file, re-read on every query.
///
/// A missing file is an empty session (all zeros).
#[derive(Debug, Clone)]
pub struct SnapshotFileStore {
    path: PathBuf,
}

impl SnapshotFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `stats` as the current snapshot.
    pub fn save(&self, stats: &SummaryStats) -> Result<(), StatsError> {
        let json = serde_json::to_string_pretty(stats)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn load(&self) -> Result<SummaryStats, StatsError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(SummaryStats::default()),
            Err(e) => Err(e.into()),
        }
    }
}

impl StatsStore for SnapshotFileStore {
    fn total_kept(&self) -> Result<u64, StatsError> {
        Ok(self.load()?.total_kept)
    }

    fn total_deleted(&self) -> Result<u64, StatsError> {
        Ok(self.load()?.total_deleted)
    }

    fn space_saved(&self) -> Result<u64, StatsError> {
        Ok(self.load()?.space_saved_bytes)
    }

    fn swipe_score(&self) -> Result<i64, StatsError> {
        Ok(self.load()?.swipe_score)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SummaryStats {
        SummaryStats {
            total_kept: 12,
            total_deleted: 30,
            space_saved_bytes: 4_200_000,
            swipe_score: -7,
        }
    }

    #[test]
    fn memory_store_answers_each_query() {
        let store = MemoryStore::new(sample());
        assert_eq!(store.total_kept().unwrap(), 12);
        assert_eq!(store.total_deleted().unwrap(), 30);
        assert_eq!(store.space_saved().unwrap(), 4_200_000);
        assert_eq!(store.swipe_score().unwrap(), -7);
    }

    #[test]
    fn memory_store_injected_failure() {
        let store = MemoryStore::new(sample());
        store.fail_on(Some(StatsQuery::SpaceSaved));

        assert!(store.total_kept().is_ok());
        match store.space_saved() {
            Err(StatsError::Query { query, .. }) => assert_eq!(query, StatsQuery::SpaceSaved),
            other => panic!("expected query error, got {other:?}"),
        }

        store.fail_on(None);
        assert!(store.space_saved().is_ok());
    }

    #[test]
    fn snapshot_file_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotFileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load().unwrap(), SummaryStats::default());
        assert_eq!(store.total_kept().unwrap(), 0);
    }

    #[test]
    fn snapshot_file_reflects_latest_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotFileStore::new(dir.path().join("stats.json"));

        store.save(&sample()).unwrap();
        assert_eq!(store.total_deleted().unwrap(), 30);

        store
            .save(&SummaryStats {
                total_deleted: 31,
                ..sample()
            })
            .unwrap();
        assert_eq!(store.total_deleted().unwrap(), 31);
    }

    #[test]
    fn snapshot_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, "{ not json").unwrap();

        let store = SnapshotFileStore::new(&path);
        assert!(matches!(store.swipe_score(), Err(StatsError::Parse(_))));
    }
}
