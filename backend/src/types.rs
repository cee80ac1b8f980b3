//! Data types and error definitions for the session summary.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Aggregates shown on the summary screen for one presentation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_kept: u64,
    pub total_deleted: u64,
    pub space_saved_bytes: u64,
    pub swipe_score: i64,
}

/// Colour class of a single dot in the summary grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellMark {
    Kept,
    Deleted,
}

/// One dot of the 10x10 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: u8,
    pub col: u8,
    pub mark: CellMark,
}

impl GridCell {
    /// Row-major position in `[0, 100)`.
    pub fn index(&self) -> usize {
        self.row as usize * crate::GRID_SIDE + self.col as usize
    }

    pub fn is_kept(&self) -> bool {
        self.mark == CellMark::Kept
    }
}

/// The four text lines under the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayLines {
    pub kept: String,
    pub deleted: String,
    pub saved: String,
    pub score: String,
}

/// The four aggregate reads the summary issues against the data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsQuery {
    TotalKept,
    TotalDeleted,
    SpaceSaved,
    SwipeScore,
}

impl fmt::Display for StatsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatsQuery::TotalKept => "total kept",
            StatsQuery::TotalDeleted => "total deleted",
            StatsQuery::SpaceSaved => "space saved",
            StatsQuery::SwipeScore => "swipe score",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while reading summary aggregates.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Query for {query} failed: {message}")]
    Query { query: StatsQuery, message: String },
    #[error("Failed to read stats snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed stats snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Refresh task failed: {0}")]
    TaskFailed(String),
}

impl From<tokio::task::JoinError> for StatsError {
    fn from(err: tokio::task::JoinError) -> Self {
        StatsError::TaskFailed(err.to_string())
    }
}
