//! Word search: find listed words along straight lines in a letter grid.

mod geometry;
mod grid;
mod rules;
mod selection;

pub use geometry::{CellPosition, expand_path, is_straight_line};
pub use grid::{FoundWord, FoundWords, LetterGrid};
pub use rules::{SelectionEffect, WordSearchInput, WordSearchItem, WordSearchRules};
pub use selection::DragSelection;
