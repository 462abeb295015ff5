//! Hangman strategy: one word per item, submitted automatically.

use super::tracker::{GuessOutcome, LetterGuessTracker};
use crate::engine::{Completion, GameRules, payload_mismatch};
use crate::error::EngineError;
use crate::model::{GameKind, ItemPayload, Submission};
use derive_getters::Getters;
use tracing::{info, instrument};

/// A loaded hangman word.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct HangmanItem {
    word: String,
    max_attempts: u32,
    category: Option<String>,
}

impl HangmanItem {
    /// Creates an item directly, mainly for local play.
    pub fn new(word: impl Into<String>, max_attempts: u32, category: Option<String>) -> Self {
        Self {
            word: word.into(),
            max_attempts,
            category,
        }
    }
}

/// Hangman rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct HangmanRules;

impl HangmanRules {
    /// Wrong guesses left before the word is lost.
    pub fn remaining_attempts(item: &HangmanItem, progress: &LetterGuessTracker) -> u32 {
        item.max_attempts.saturating_sub(progress.errors())
    }
}

impl GameRules for HangmanRules {
    type Item = HangmanItem;
    type Progress = LetterGuessTracker;
    type Input = char;
    type Effect = GuessOutcome;

    fn kind(&self) -> GameKind {
        GameKind::Hangman
    }

    fn item_from_payload(&self, payload: ItemPayload) -> Result<Self::Item, EngineError> {
        match payload {
            ItemPayload::Hangman {
                word,
                max_attempts,
                category,
            } => Ok(HangmanItem {
                word,
                max_attempts,
                category,
            }),
            other => Err(payload_mismatch(GameKind::Hangman, &other)),
        }
    }

    fn start(&self, item: &Self::Item) -> Self::Progress {
        LetterGuessTracker::new(&item.word)
    }

    #[instrument(skip(self, item, progress))]
    fn apply(
        &self,
        item: &Self::Item,
        progress: &mut Self::Progress,
        input: Self::Input,
    ) -> Result<Self::Effect, EngineError> {
        let outcome = progress
            .guess(input)
            .ok_or_else(|| EngineError::InvalidInput(format!("'{}' is not a letter", input)))?;
        info!(
            outcome = ?outcome,
            errors = progress.errors(),
            max_attempts = item.max_attempts,
            "Guess applied"
        );
        Ok(outcome)
    }

    fn completion(&self, item: &Self::Item, progress: &Self::Progress) -> Completion {
        if progress.all_letters_found() || progress.errors() >= item.max_attempts {
            Completion::AutoSubmit
        } else {
            Completion::Incomplete
        }
    }

    fn build_submission(
        &self,
        _item: &Self::Item,
        progress: &Self::Progress,
        hints_used: u32,
    ) -> Submission {
        Submission::Hangman {
            guessed_letters: progress.guessed().to_vec(),
            hints_used,
        }
    }

    fn supports_auto_advance(&self) -> bool {
        true
    }
}
