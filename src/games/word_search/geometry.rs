//! Straight-line selection geometry over a letter grid.

use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell coordinate in the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new,
)]
pub struct CellPosition {
    /// Row index, top to bottom.
    pub row: i32,
    /// Column index, left to right.
    pub col: i32,
}

impl std::fmt::Display for CellPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Returns true if `end` lies on one of the eight compass directions from `start`.
#[instrument]
pub fn is_straight_line(start: CellPosition, end: CellPosition) -> bool {
    let (row_delta, col_delta) = deltas(start, end);
    row_delta == 0 || col_delta == 0 || row_delta.abs() == col_delta.abs()
}

/// Row and column deltas, widened so extreme coordinates cannot overflow.
fn deltas(start: CellPosition, end: CellPosition) -> (i64, i64) {
    (
        i64::from(end.row) - i64::from(start.row),
        i64::from(end.col) - i64::from(start.col),
    )
}

/// Expands a start/end pair into the inclusive, ordered list of cells between them.
///
/// Produces `max(|Δrow|, |Δcol|) + 1` cells stepping by the sign of each delta.
/// Callers are expected to check [`is_straight_line`] first; for other pairs the
/// walk follows the dominant axis and the result is not a valid selection.
///
/// The path is materialized in full; bound the endpoints (for example against
/// a grid, as [`super::LetterGrid::read_path`] does) before expanding
/// untrusted selections.
#[instrument]
pub fn expand_path(start: CellPosition, end: CellPosition) -> Vec<CellPosition> {
    let (row_delta, col_delta) = deltas(start, end);
    let steps = row_delta.abs().max(col_delta.abs());
    let (row_step, col_step) = (row_delta.signum(), col_delta.signum());

    (0..=steps)
        .filter_map(|i| {
            let row = i32::try_from(i64::from(start.row) + row_step * i).ok()?;
            let col = i32::try_from(i64::from(start.col) + col_step * i).ok()?;
            Some(CellPosition::new(row, col))
        })
        .collect()
}
