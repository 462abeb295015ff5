//! Letter guess tracking for one hangman word.

use crate::text::{normalize_letter, normalize_text};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// What a single guess did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuessOutcome {
    /// The letter is in the word.
    Hit,
    /// The letter is not in the word; one error was counted.
    Miss,
    /// The letter was guessed before; nothing changed.
    Repeated,
}

/// Tracks guesses against a target word.
///
/// All comparisons use normalized letters; guesses are kept as typed for
/// display and submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterGuessTracker {
    word: String,
    target: BTreeSet<String>,
    guessed: Vec<char>,
    guessed_normalized: BTreeSet<String>,
    errors: u32,
}

impl LetterGuessTracker {
    /// Creates a tracker for `word`.
    ///
    /// Only alphabetic characters count as letters to guess; spaces and
    /// punctuation are shown as-is.
    #[instrument]
    pub fn new(word: &str) -> Self {
        let target = word.chars().filter_map(normalize_letter).collect();
        Self {
            word: word.to_string(),
            target,
            guessed: Vec::new(),
            guessed_normalized: BTreeSet::new(),
            errors: 0,
        }
    }

    /// Registers a guess.
    ///
    /// Returns `None` if `letter` is not a letter at all.
    #[instrument(skip(self))]
    pub fn guess(&mut self, letter: char) -> Option<GuessOutcome> {
        let normalized = normalize_letter(letter)?;
        if !self.guessed_normalized.insert(normalized.clone()) {
            debug!(letter = %normalized, "Letter already guessed");
            return Some(GuessOutcome::Repeated);
        }
        self.guessed.push(letter);

        if self.target.contains(&normalized) {
            Some(GuessOutcome::Hit)
        } else {
            self.errors += 1;
            debug!(letter = %normalized, errors = self.errors, "Wrong guess");
            Some(GuessOutcome::Miss)
        }
    }

    /// Returns true once every distinct letter of the word has been guessed.
    pub fn all_letters_found(&self) -> bool {
        self.target.is_subset(&self.guessed_normalized)
    }

    /// Wrong guesses so far.
    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Guessed letters in guess order, as typed.
    pub fn guessed(&self) -> &[char] {
        &self.guessed
    }

    /// Returns true if the letter has been guessed, in any case or accent.
    pub fn has_guessed(&self, letter: char) -> bool {
        normalize_letter(letter).is_some_and(|l| self.guessed_normalized.contains(&l))
    }

    /// The target word with unguessed letters replaced by `mask`.
    pub fn masked_word(&self, mask: char) -> String {
        self.word
            .chars()
            .map(|c| match normalize_letter(c) {
                Some(l) if !self.guessed_normalized.contains(&l) => mask,
                _ => c,
            })
            .collect()
    }

    /// The target word in normalized form.
    pub fn normalized_word(&self) -> String {
        normalize_text(&self.word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_and_misses() {
        let mut tracker = LetterGuessTracker::new("CASA");
        assert_eq!(tracker.guess('c'), Some(GuessOutcome::Hit));
        assert_eq!(tracker.guess('x'), Some(GuessOutcome::Miss));
        assert_eq!(tracker.errors(), 1);
    }

    #[test]
    fn test_repeat_is_ignored() {
        let mut tracker = LetterGuessTracker::new("CASA");
        tracker.guess('z');
        assert_eq!(tracker.guess('Z'), Some(GuessOutcome::Repeated));
        assert_eq!(tracker.errors(), 1);
        assert_eq!(tracker.guessed(), &['z']);
    }

    #[test]
    fn test_accented_guess_matches_plain_letter() {
        let mut tracker = LetterGuessTracker::new("CANCIÓN");
        assert_eq!(tracker.guess('o'), Some(GuessOutcome::Hit));
        assert_eq!(tracker.guess('Ó'), Some(GuessOutcome::Repeated));
    }

    #[test]
    fn test_native_letter_is_distinct() {
        let mut tracker = LetterGuessTracker::new("NIÑO");
        assert_eq!(tracker.guess('n'), Some(GuessOutcome::Hit));
        assert!(!tracker.has_guessed('ñ'));
        assert_eq!(tracker.masked_word('_'), "N___");
        assert_eq!(tracker.guess('ñ'), Some(GuessOutcome::Hit));
        assert_eq!(tracker.masked_word('_'), "N_Ñ_");
    }

    #[test]
    fn test_all_letters_found() {
        let mut tracker = LetterGuessTracker::new("CASA");
        for letter in ['c', 'a'] {
            tracker.guess(letter);
        }
        assert!(!tracker.all_letters_found());
        tracker.guess('s');
        assert!(tracker.all_letters_found());
    }

    #[test]
    fn test_spaces_are_not_letters() {
        let mut tracker = LetterGuessTracker::new("LA ROSA");
        assert_eq!(tracker.masked_word('_'), "__ ____");
        assert_eq!(tracker.guess(' '), None);
        for letter in ['l', 'a', 'r', 'o', 's'] {
            tracker.guess(letter);
        }
        assert!(tracker.all_letters_found());
    }
}
