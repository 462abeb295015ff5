//! The three mini-games and their rules.

pub mod complete_phrase;
pub mod hangman;
pub mod word_search;
