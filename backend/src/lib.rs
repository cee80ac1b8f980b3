//! UI-agnostic summary logic for a finished swipe session.
//!
//! Provides the keep/delete percentage and dot grid, display formatting, the data-store
//! contract the summary reads from, and the Hidden/Visible screen state machine.
//! Uses `tokio` for the concurrent refresh and `humansize` for byte units.

mod presenter;
mod refresh;
mod screen;
mod store;
mod types;

pub use presenter::{
    build_grid, format_bytes, format_count, format_display_lines, kept_percentage, GRID_CELLS,
    GRID_SIDE,
};
pub use refresh::{refresh_stats, RefreshTask};
pub use screen::{fade_opacity, SummaryEvent, SummaryScreen, SummaryView, FADE_IN};
pub use store::{MemoryStore, SnapshotFileStore, StatsStore};
pub use types::{CellMark, DisplayLines, GridCell, StatsError, StatsQuery, SummaryStats};
