//! Derived display state: keep percentage, dot grid and formatted lines.

use crate::types::{CellMark, DisplayLines, GridCell, SummaryStats};
use humansize::{format_size, DECIMAL};

/// Dots per grid row and column.
pub const GRID_SIDE: usize = 10;

/// Total dots in the grid; one dot per percentage point.
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;

/// Share of kept items as a whole percentage in `[0, 100]`.
///
/// An empty session (nothing kept or deleted) is 0%. Halves round up, computed in
/// integer arithmetic so large counts never lose precision.
pub fn kept_percentage(total_kept: u64, total_deleted: u64) -> u8 {
    let total = total_kept as u128 + total_deleted as u128;
    if total == 0 {
        return 0;
    }

    // round(kept / total * 100) == floor((200 * kept + total) / (2 * total))
    let pct = (200 * total_kept as u128 + total) / (2 * total);
    pct.min(100) as u8
}

/// Build the 10x10 grid in row-major order; the first `percentage` dots are kept.
pub fn build_grid(percentage: u8) -> Vec<GridCell> {
    let kept = (percentage as usize).min(GRID_CELLS);

    (0..GRID_SIDE)
        .flat_map(|row| (0..GRID_SIDE).map(move |col| (row, col)))
        .map(|(row, col)| GridCell {
            row: row as u8,
            col: col as u8,
            mark: if row * GRID_SIDE + col < kept {
                CellMark::Kept
            } else {
                CellMark::Deleted
            },
        })
        .collect()
}

/// Format the four summary lines shown under the grid.
pub fn format_display_lines(stats: &SummaryStats) -> DisplayLines {
    DisplayLines {
        kept: format!("{} kept", format_count(stats.total_kept)),
        deleted: format!("{} deleted", format_count(stats.total_deleted)),
        saved: format!("{} saved", format_bytes(stats.space_saved_bytes)),
        score: format!("{} SwipeScore", format_count(stats.swipe_score)),
    }
}

/// Format an integer with comma thousands separators (e.g., -12345 → "-12,345").
pub fn format_count(n: impl Into<i128>) -> String {
    let n: i128 = n.into();
    let digits = n.unsigned_abs().to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if n < 0 {
        result.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format a byte count with decimal (1000-based) units, e.g. "1.5 GB".
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

impl SummaryStats {
    pub fn kept_percentage(&self) -> u8 {
        kept_percentage(self.total_kept, self.total_deleted)
    }

    pub fn grid(&self) -> Vec<GridCell> {
        build_grid(self.kept_percentage())
    }

    pub fn lines(&self) -> DisplayLines {
        format_display_lines(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn percentage_of_empty_session_is_zero() {
        assert_eq!(kept_percentage(0, 0), 0);
    }

    #[test]
    fn percentage_known_values() {
        assert_eq!(kept_percentage(10, 0), 100);
        assert_eq!(kept_percentage(0, 10), 0);
        assert_eq!(kept_percentage(5, 5), 50);
        assert_eq!(kept_percentage(1, 2), 33);
        assert_eq!(kept_percentage(2, 1), 67);
        assert_eq!(kept_percentage(742, 103), 88);
    }

    #[test]
    fn percentage_ties_round_up() {
        // 1/8 = 12.5%, 3/8 = 37.5%
        assert_eq!(kept_percentage(1, 7), 13);
        assert_eq!(kept_percentage(3, 5), 38);
        // 1/200 = 0.5%
        assert_eq!(kept_percentage(1, 199), 1);
    }

    #[test]
    fn percentage_handles_huge_counts() {
        assert_eq!(kept_percentage(u64::MAX, u64::MAX), 50);
        assert_eq!(kept_percentage(u64::MAX, 0), 100);
    }

    #[test]
    fn grid_is_row_major() {
        let grid = build_grid(15);
        assert_eq!(grid.len(), GRID_CELLS);
        for (i, cell) in grid.iter().enumerate() {
            assert_eq!(cell.index(), i);
            assert_eq!(cell.row as usize, i / GRID_SIDE);
            assert_eq!(cell.col as usize, i % GRID_SIDE);
        }
        assert!(grid[14].is_kept());
        assert!(!grid[15].is_kept());
        assert_eq!(grid[14].row, 1);
        assert_eq!(grid[14].col, 4);
    }

    #[test]
    fn grid_extremes() {
        assert!(build_grid(0).iter().all(|c| c.mark == CellMark::Deleted));
        assert!(build_grid(100).iter().all(|c| c.mark == CellMark::Kept));
        assert!(build_grid(200).iter().all(GridCell::is_kept));
    }

    #[test]
    fn count_grouping() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(u64::MAX), "18,446,744,073,709,551,615");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(9001), "9,001");
        assert_eq!(format_count(1234567), "1,234,567");
        assert_eq!(format_count(-12345), "-12,345");
        assert_eq!(format_count(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn bytes_use_decimal_units() {
        assert_eq!(format_bytes(0), "0 B");
        let gb = format_bytes(1_500_000_000);
        assert!(gb.starts_with("1.5"), "got {gb}");
        assert!(gb.ends_with("GB"), "got {gb}");
        assert!(format_bytes(2_000_000).ends_with("MB"));
    }

    #[test]
    fn scenario_lines() {
        let stats = SummaryStats {
            total_kept: 742,
            total_deleted: 103,
            space_saved_bytes: 1_500_000_000,
            swipe_score: 9001,
        };

        assert_eq!(stats.kept_percentage(), 88);
        assert_eq!(stats.grid().iter().filter(|c| c.is_kept()).count(), 88);

        let lines = stats.lines();
        assert_eq!(lines.kept, "742 kept");
        assert_eq!(lines.deleted, "103 deleted");
        assert!(lines.saved.starts_with("1.5"));
        assert!(lines.saved.ends_with("GB saved"));
        assert_eq!(lines.score, "9,001 SwipeScore");
    }

    proptest! {
        #[test]
        fn percentage_in_range(k in any::<u64>(), d in any::<u64>()) {
            prop_assert!(kept_percentage(k, d) <= 100);
        }

        #[test]
        fn percentage_matches_float_rounding(k in 0u64..1_000_000, d in 0u64..1_000_000) {
            prop_assume!(k + d > 0);
            let expected = (k as f64 / (k + d) as f64 * 100.0).round() as u8;
            let got = kept_percentage(k, d);
            // Float error can only move a value sitting exactly on .5.
            prop_assert!((got as i16 - expected as i16).abs() <= 1);
        }

        #[test]
        fn grid_marks_first_p_cells(p in 0u8..=100) {
            let grid = build_grid(p);
            prop_assert_eq!(grid.len(), GRID_CELLS);
            prop_assert_eq!(grid.iter().filter(|c| c.is_kept()).count(), p as usize);
            for cell in &grid {
                prop_assert_eq!(cell.is_kept(), cell.index() < p as usize);
            }
            prop_assert_eq!(build_grid(p), grid);
        }
    }
}
