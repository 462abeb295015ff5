//! Hangman: guess the letters of a hidden word before running out of attempts.

mod rules;
mod tracker;

pub use rules::{HangmanItem, HangmanRules};
pub use tracker::{GuessOutcome, LetterGuessTracker};
