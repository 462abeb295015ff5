//! Pointer drag tracking for grid selections.

use super::geometry::{CellPosition, expand_path, is_straight_line};
use tracing::{debug, instrument};

/// State of an in-progress drag gesture.
///
/// Every move is validated against the cell where the drag began, never
/// against the previous move, so the selection cannot drift off its line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSelection {
    anchor: Option<CellPosition>,
    current: Option<CellPosition>,
}

impl DragSelection {
    /// Creates an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a drag at `cell`, discarding any unfinished one.
    #[instrument(skip(self))]
    pub fn begin(&mut self, cell: CellPosition) {
        self.anchor = Some(cell);
        self.current = Some(cell);
    }

    /// Moves the pointer to `cell`.
    ///
    /// The move is kept only if it forms a straight line with the anchor.
    /// Returns the highlighted path after the move, or `None` when idle.
    #[instrument(skip(self))]
    pub fn move_to(&mut self, cell: CellPosition) -> Option<Vec<CellPosition>> {
        let anchor = self.anchor?;
        if is_straight_line(anchor, cell) {
            self.current = Some(cell);
        } else {
            debug!(anchor = %anchor, "Ignoring off-line move");
        }
        self.path()
    }

    /// Cells currently highlighted, from anchor to the last accepted cell.
    pub fn path(&self) -> Option<Vec<CellPosition>> {
        Some(expand_path(self.anchor?, self.current?))
    }

    /// Returns true while a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Finishes the drag and returns its endpoints.
    #[instrument(skip(self))]
    pub fn end(&mut self) -> Option<(CellPosition, CellPosition)> {
        let anchor = self.anchor.take()?;
        let current = self.current.take()?;
        Some((anchor, current))
    }

    /// Abandons the drag without a selection.
    pub fn cancel(&mut self) {
        self.anchor = None;
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: i32, col: i32) -> CellPosition {
        CellPosition::new(row, col)
    }

    #[test]
    fn test_moves_reanchor_to_start() {
        let mut drag = DragSelection::new();
        drag.begin(cell(0, 0));
        drag.move_to(cell(0, 2));
        // (1, 3) is diagonal from (0, 2) but not from the anchor.
        let path = drag.move_to(cell(1, 3)).expect("active drag");
        assert_eq!(path.last().copied(), Some(cell(0, 2)));
        assert_eq!(drag.end(), Some((cell(0, 0), cell(0, 2))));
    }

    #[test]
    fn test_idle_tracker_ignores_moves() {
        let mut drag = DragSelection::new();
        assert_eq!(drag.move_to(cell(1, 1)), None);
        assert_eq!(drag.end(), None);
    }

    #[test]
    fn test_cancel_clears_state() {
        let mut drag = DragSelection::new();
        drag.begin(cell(2, 2));
        drag.cancel();
        assert!(!drag.is_active());
    }
}
