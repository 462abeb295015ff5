//! Errors raised when the session controller is driven incorrectly.

use crate::engine::SessionStatus;
use crate::model::GameKind;
use derive_more::{Display, Error};

/// Error returned by controller operations that cannot run right now.
///
/// Collaborator failures are not `EngineError`s: they are folded into the
/// session state (see [`crate::ServiceError`]).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// The operation is not allowed in the current session status.
    #[display("Cannot {} while session is {}", operation, status)]
    InvalidState {
        /// Operation that was attempted.
        operation: &'static str,
        /// Status the session was in.
        status: SessionStatus,
    },

    /// A validation call for this item is still in flight.
    #[display("A submission for this item is already in flight")]
    SubmitInFlight,

    /// The item is not complete enough to submit.
    #[display("Item is not ready to submit")]
    NotReady,

    /// The answer refers to a blank the item does not define.
    #[display("Unknown blank id {}", _0)]
    UnknownBlank(#[error(not(source))] u32),

    /// The fetched payload belongs to a different game.
    #[display("Expected a {} item, got {}", expected, found)]
    PayloadMismatch {
        /// Game the controller plays.
        expected: GameKind,
        /// Game the payload belongs to.
        found: GameKind,
    },

    /// The input cannot be applied to the current item.
    #[display("Invalid input: {}", _0)]
    InvalidInput(#[error(not(source))] String),
}
