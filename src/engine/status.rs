//! Session lifecycle status.

use serde::{Deserialize, Serialize};

/// Where a session is in its lifecycle. Exactly one is active at a time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIs,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    /// Fetching the current item.
    Loading,
    /// Accepting input for the current item.
    Playing,
    /// Hangman only: a word was validated and more remain.
    WordCompleted,
    /// The current attempt is over.
    Completed,
    /// The item could not be loaded.
    Error,
}
