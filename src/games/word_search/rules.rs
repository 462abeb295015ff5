//! Word-search strategy: one grid, explicit submit of every found word.

use super::geometry::CellPosition;
use super::grid::{FoundWord, FoundWords, LetterGrid};
use crate::engine::{Completion, GameRules, payload_mismatch};
use crate::error::EngineError;
use crate::model::{GameKind, ItemPayload, Submission};
use derive_getters::Getters;
use tracing::{debug, info, instrument};

/// A loaded word-search grid.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct WordSearchItem {
    grid: LetterGrid,
    words: Vec<String>,
    case_sensitive: bool,
}

/// Input for a word-search item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordSearchInput {
    /// A released drag from `start` to `end`.
    Select {
        /// Anchor cell of the drag.
        start: CellPosition,
        /// Cell where the drag was released.
        end: CellPosition,
    },
}

/// Result of a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEffect {
    /// A new word was recorded.
    Found(FoundWord),
    /// The endpoints were already recorded.
    AlreadyFound,
    /// The selection spells no listed word.
    NoMatch,
}

/// Word-search rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordSearchRules;

impl GameRules for WordSearchRules {
    type Item = WordSearchItem;
    type Progress = FoundWords;
    type Input = WordSearchInput;
    type Effect = SelectionEffect;

    fn kind(&self) -> GameKind {
        GameKind::WordSearch
    }

    fn item_from_payload(&self, payload: ItemPayload) -> Result<Self::Item, EngineError> {
        match payload {
            ItemPayload::WordSearch {
                grid,
                words,
                case_sensitive,
            } => Ok(WordSearchItem {
                grid: LetterGrid::new(grid),
                words,
                case_sensitive,
            }),
            other => Err(payload_mismatch(GameKind::WordSearch, &other)),
        }
    }

    fn start(&self, _item: &Self::Item) -> Self::Progress {
        FoundWords::new()
    }

    #[instrument(skip(self, item, progress))]
    fn apply(
        &self,
        item: &Self::Item,
        progress: &mut Self::Progress,
        input: Self::Input,
    ) -> Result<Self::Effect, EngineError> {
        let WordSearchInput::Select { start, end } = input;

        let Some(word) = item
            .grid
            .match_word(start, end, &item.words, item.case_sensitive)
        else {
            debug!("Selection matched no word");
            return Ok(SelectionEffect::NoMatch);
        };

        let found = FoundWord::new(word.to_string(), start, end);
        if progress.record(found.clone()) {
            info!(word = %word, found = progress.len(), "Word found");
            Ok(SelectionEffect::Found(found))
        } else {
            Ok(SelectionEffect::AlreadyFound)
        }
    }

    fn completion(&self, _item: &Self::Item, progress: &Self::Progress) -> Completion {
        if progress.is_empty() {
            Completion::Incomplete
        } else {
            Completion::SubmitEnabled
        }
    }

    fn build_submission(
        &self,
        _item: &Self::Item,
        progress: &Self::Progress,
        hints_used: u32,
    ) -> Submission {
        Submission::WordSearch {
            found_words: progress.as_slice().to_vec(),
            hints_used,
        }
    }

    fn supports_auto_advance(&self) -> bool {
        false
    }
}
