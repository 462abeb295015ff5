//! The per-game strategy seam used by the session controller.

use crate::error::EngineError;
use crate::model::{GameKind, ItemPayload, Submission};
use std::fmt::Debug;

/// What the completion predicate says about the current item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Completion {
    /// Not enough input to submit.
    Incomplete,
    /// The player may submit explicitly.
    SubmitEnabled,
    /// The controller submits on its own.
    AutoSubmit,
}

impl Completion {
    /// Returns true if a submission may be issued.
    pub fn allows_submit(self) -> bool {
        !matches!(self, Completion::Incomplete)
    }
}

/// Game-specific behavior plugged into [`crate::GameSessionController`].
///
/// The controller owns lifecycle, tickets and results; a `GameRules`
/// implementation decides what input means and when an item is done.
pub trait GameRules: Debug {
    /// Typed item content extracted from an [`ItemPayload`].
    type Item: Debug + Clone;
    /// Player state for the current item.
    type Progress: Debug + Clone;
    /// One input mutation.
    type Input: Debug;
    /// What applying an input did.
    type Effect: Debug;

    /// Game this strategy plays.
    fn kind(&self) -> GameKind;

    /// Extracts the typed item, rejecting payloads of other games.
    fn item_from_payload(&self, payload: ItemPayload) -> Result<Self::Item, EngineError>;

    /// Fresh progress for a newly loaded item.
    fn start(&self, item: &Self::Item) -> Self::Progress;

    /// Applies one input to the progress.
    fn apply(
        &self,
        item: &Self::Item,
        progress: &mut Self::Progress,
        input: Self::Input,
    ) -> Result<Self::Effect, EngineError>;

    /// Evaluated after every applied input.
    fn completion(&self, item: &Self::Item, progress: &Self::Progress) -> Completion;

    /// Builds the validation payload for the current item.
    fn build_submission(
        &self,
        item: &Self::Item,
        progress: &Self::Progress,
        hints_used: u32,
    ) -> Submission;

    /// True if items are validated one by one with a pause between them.
    fn supports_auto_advance(&self) -> bool;
}

/// Builds the mismatch error for a payload of the wrong game.
pub(crate) fn payload_mismatch(expected: GameKind, payload: &ItemPayload) -> EngineError {
    EngineError::PayloadMismatch {
        expected,
        found: payload.kind(),
    }
}
