//! Concurrent, all-or-nothing refresh of the summary aggregates.

use crate::store::StatsStore;
use crate::types::{StatsError, SummaryStats};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::debug;

/// Read all four aggregates concurrently.
///
/// Only returns stats once every query has succeeded; the first failure wins.
pub async fn refresh_stats(store: Arc<dyn StatsStore>) -> Result<SummaryStats, StatsError> {
    debug!("refreshing summary stats");

    let (total_kept, total_deleted, space_saved_bytes, swipe_score) = tokio::try_join!(
        query(&store, |s| s.total_kept()),
        query(&store, |s| s.total_deleted()),
        query(&store, |s| s.space_saved()),
        query(&store, |s| s.swipe_score()),
    )?;

    let stats = SummaryStats {
        total_kept,
        total_deleted,
        space_saved_bytes,
        swipe_score,
    };
    debug!(?stats, "summary stats refreshed");
    Ok(stats)
}

// Store calls may block, so each runs on the blocking pool.
async fn query<T: Send + 'static>(
    store: &Arc<dyn StatsStore>,
    read: fn(&dyn StatsStore) -> Result<T, StatsError>,
) -> Result<T, StatsError> {
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || read(store.as_ref())).await?
}

/// One in-flight refresh. Dropping it aborts the refresh and discards its result.
pub struct RefreshTask {
    rx: oneshot::Receiver<Result<SummaryStats, StatsError>>,
    handle: JoinHandle<()>,
}

impl RefreshTask {
    pub fn spawn(runtime: &Handle, store: Arc<dyn StatsStore>) -> Self {
        let (tx, rx) = oneshot::channel();
        let handle = runtime.spawn(async move {
            // Receiver gone means the refresh was cancelled.
            let _ = tx.send(refresh_stats(store).await);
        });
        Self { rx, handle }
    }

    /// Non-blocking check for the result. `None` while still running.
    pub fn try_take(&mut self) -> Option<Result<SummaryStats, StatsError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(StatsError::TaskFailed(
                "refresh ended without a result".to_string(),
            ))),
        }
    }

    /// Wait for the result.
    pub async fn wait(&mut self) -> Result<SummaryStats, StatsError> {
        (&mut self.rx).await.map_err(|_| {
            StatsError::TaskFailed("refresh ended without a result".to_string())
        })?
    }

    pub fn cancel(self) {
        debug!("summary refresh cancelled");
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
