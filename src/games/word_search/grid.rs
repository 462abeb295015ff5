//! Letter grid, word matching and the found-word list.

use super::geometry::{CellPosition, expand_path, is_straight_line};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Shortest selection that can count as a word.
const MIN_WORD_LEN: usize = 2;

/// Rectangular grid of letters.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct LetterGrid {
    rows: Vec<Vec<char>>,
}

impl LetterGrid {
    /// Creates a grid from its rows.
    pub fn new(rows: Vec<Vec<char>>) -> Self {
        Self { rows }
    }

    /// Returns the letter at `cell`, if the cell is inside the grid.
    pub fn letter_at(&self, cell: CellPosition) -> Option<char> {
        let row = usize::try_from(cell.row).ok()?;
        let col = usize::try_from(cell.col).ok()?;
        self.rows.get(row)?.get(col).copied()
    }

    /// Concatenates the letters along the straight path from `start` to `end`.
    ///
    /// Returns `None` if the pair is not a straight line or either endpoint lies
    /// outside the grid. With both endpoints inside, every cell between them is
    /// too, so the path is never longer than the grid.
    #[instrument(skip(self))]
    pub fn read_path(&self, start: CellPosition, end: CellPosition) -> Option<String> {
        if self.letter_at(start).is_none() || self.letter_at(end).is_none() {
            debug!("Selection leaves the grid");
            return None;
        }
        if !is_straight_line(start, end) {
            return None;
        }
        expand_path(start, end)
            .into_iter()
            .map(|cell| self.letter_at(cell))
            .collect()
    }

    /// Finds the listed word spelled by the path, in either direction.
    ///
    /// When `case_sensitive` is false both sides are lowercased before comparing.
    /// Returns the word as it appears in `words`.
    #[instrument(skip(self, words))]
    pub fn match_word<'w>(
        &self,
        start: CellPosition,
        end: CellPosition,
        words: &'w [String],
        case_sensitive: bool,
    ) -> Option<&'w str> {
        let candidate = self.read_path(start, end)?;
        if candidate.chars().count() < MIN_WORD_LEN {
            return None;
        }

        let fold = |s: &str| {
            if case_sensitive {
                s.to_string()
            } else {
                s.to_lowercase()
            }
        };
        let forward = fold(&candidate);
        let reversed: String = forward.chars().rev().collect();

        let found = words
            .iter()
            .find(|w| {
                let listed = fold(w);
                listed == forward || listed == reversed
            })
            .map(String::as_str);
        debug!(candidate = %candidate, matched = ?found, "Matched selection against word list");
        found
    }
}

/// A word located in the grid, recorded by its endpoints only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct FoundWord {
    /// The listed word that was matched.
    word: String,
    /// Cell where the selection started.
    start: CellPosition,
    /// Cell where the selection ended.
    end: CellPosition,
}

impl FoundWord {
    /// Cells covered by this word, recomputed from the endpoints.
    pub fn cells(&self) -> Vec<CellPosition> {
        expand_path(self.start, self.end)
    }
}

/// Found words of the current grid, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundWords {
    words: Vec<FoundWord>,
}

impl FoundWords {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a word unless the same start/end pair is already recorded.
    ///
    /// Returns true if the record was appended.
    #[instrument(skip(self), fields(word = %found.word()))]
    pub fn record(&mut self, found: FoundWord) -> bool {
        if self
            .words
            .iter()
            .any(|w| w.start == found.start && w.end == found.end)
        {
            debug!("Selection already recorded");
            return false;
        }
        self.words.push(found);
        true
    }

    /// Returns true if `cell` lies on any found word.
    pub fn contains_cell(&self, cell: CellPosition) -> bool {
        self.words.iter().any(|w| w.cells().contains(&cell))
    }

    /// Returns true if `word` has been found at least once.
    pub fn contains_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.word == word)
    }

    /// Found-word records in discovery order.
    pub fn as_slice(&self) -> &[FoundWord] {
        &self.words
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if nothing has been found yet.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: i32, col: i32) -> CellPosition {
        CellPosition::new(row, col)
    }

    fn grid() -> LetterGrid {
        LetterGrid::new(vec![
            vec!['G', 'A', 'T', 'O'],
            vec!['X', 'S', 'O', 'L'],
            vec!['P', 'E', 'Z', 'M'],
            vec!['R', 'A', 'N', 'A'],
        ])
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_case_insensitive_match() {
        let list = words(&["gato"]);
        assert_eq!(grid().match_word(cell(0, 0), cell(0, 3), &list, false), Some("gato"));
    }

    #[test]
    fn test_case_sensitive_rejects_lowercase() {
        let list = words(&["gato"]);
        assert_eq!(grid().match_word(cell(0, 0), cell(0, 3), &list, true), None);
    }

    #[test]
    fn test_reversed_word_matches_either_drag() {
        let list = words(&["OTAG"]);
        assert_eq!(grid().match_word(cell(0, 0), cell(0, 3), &list, true), Some("OTAG"));
        assert_eq!(grid().match_word(cell(0, 3), cell(0, 0), &list, true), Some("OTAG"));
    }

    #[test]
    fn test_single_letter_never_matches() {
        let list = words(&["G"]);
        assert_eq!(grid().match_word(cell(0, 0), cell(0, 0), &list, false), None);
    }

    #[test]
    fn test_path_outside_grid() {
        let list = words(&["RANAS"]);
        assert_eq!(grid().match_word(cell(3, 0), cell(3, 4), &list, false), None);
    }

    #[test]
    fn test_far_endpoint_rejected_before_expanding() {
        assert_eq!(grid().read_path(cell(0, 0), cell(0, 100_000_000)), None);
        assert_eq!(grid().read_path(cell(i32::MIN, 0), cell(i32::MAX, 0)), None);
        assert_eq!(grid().read_path(cell(-1, -1), cell(2, 2)), None);
    }

    #[test]
    fn test_crooked_selection_is_rejected() {
        assert_eq!(grid().read_path(cell(0, 0), cell(1, 3)), None);
    }

    #[test]
    fn test_dedup_by_endpoints() {
        let mut found = FoundWords::new();
        assert!(found.record(FoundWord::new("GATO".into(), cell(0, 0), cell(0, 3))));
        assert!(!found.record(FoundWord::new("GATO".into(), cell(0, 0), cell(0, 3))));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_contains_cell_recomputes_path() {
        let mut found = FoundWords::new();
        found.record(FoundWord::new("GSZA".into(), cell(0, 0), cell(3, 3)));
        assert!(found.contains_cell(cell(2, 2)));
        assert!(!found.contains_cell(cell(2, 1)));
    }
}
