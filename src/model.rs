//! Wire data model shared by the engine and its remote collaborators.

use crate::games::word_search::FoundWord;
use derive_getters::Getters;
use derive_new::new;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Identifier of a game session on the remote side.
pub type SessionId = String;

/// Which mini-game a payload or submission belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameKind {
    /// Find listed words in a letter grid.
    WordSearch,
    /// Guess the letters of a hidden word.
    Hangman,
    /// Fill the blanks of a phrase template.
    CompletePhrase,
}

/// One solvable unit of a session, as fetched from the remote side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
pub struct PlayableItem {
    /// Zero-based position of this item in the session.
    item_index: usize,
    /// How many items the session holds in total.
    total_items: usize,
    /// Game-specific content.
    payload: ItemPayload,
}

impl PlayableItem {
    /// Returns true if this is the final item of the session.
    pub fn is_last(&self) -> bool {
        self.item_index + 1 >= self.total_items
    }
}

/// Game-specific content of a [`PlayableItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum ItemPayload {
    /// A letter grid and the words hidden in it.
    WordSearch {
        /// Grid rows; every row holds one letter per cell.
        grid: Vec<Vec<char>>,
        /// Words to find.
        words: Vec<String>,
        /// Whether matching distinguishes letter case.
        #[serde(default)]
        case_sensitive: bool,
    },
    /// A hidden word to guess letter by letter.
    Hangman {
        /// The target word.
        word: String,
        /// Wrong guesses allowed before the word is lost.
        max_attempts: u32,
        /// Optional category shown as a clue.
        #[serde(default)]
        category: Option<String>,
    },
    /// A phrase template with numbered blanks.
    CompletePhrase {
        /// Template text with `{n}` markers.
        template: String,
        /// Blank definitions in display order.
        blanks: Vec<Blank>,
    },
}

impl ItemPayload {
    /// Returns the game this payload belongs to.
    pub fn kind(&self) -> GameKind {
        match self {
            ItemPayload::WordSearch { .. } => GameKind::WordSearch,
            ItemPayload::Hangman { .. } => GameKind::Hangman,
            ItemPayload::CompletePhrase { .. } => GameKind::CompletePhrase,
        }
    }
}

/// How a blank is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankKind {
    /// Free text input.
    Text,
    /// Pick one of the offered options.
    Select,
    /// Drop one of the offered options into the slot.
    DragDrop,
}

impl BlankKind {
    /// Select and drag-and-drop blanks both answer from an option list.
    pub fn uses_options(self) -> bool {
        matches!(self, BlankKind::Select | BlankKind::DragDrop)
    }
}

/// A fill-in slot of a phrase item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Blank {
    /// Stable position index referenced by `{id}` in the template.
    id: u32,
    /// Input style.
    kind: BlankKind,
    /// Options offered for select and drag-and-drop blanks.
    #[serde(default)]
    options: Vec<String>,
}

/// A player's answer to one blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct BlankAnswer {
    /// Blank the answer belongs to.
    blank_id: u32,
    /// Entered or selected value.
    value: String,
}

/// Everything sent to the validation collaborator for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum Submission {
    /// All words found in the grid.
    WordSearch {
        /// Found-word records in discovery order.
        found_words: Vec<FoundWord>,
        /// Hints consumed for this item.
        hints_used: u32,
    },
    /// Letters guessed for the current word.
    Hangman {
        /// Guessed letters in guess order, as typed.
        guessed_letters: Vec<char>,
        /// Hints consumed for this item.
        hints_used: u32,
    },
    /// Ordered answers for the current phrase.
    CompletePhrase {
        /// One answer per blank, in blank order.
        answers: Vec<BlankAnswer>,
        /// Hints consumed for this item.
        hints_used: u32,
    },
}

impl Submission {
    /// Returns the game this submission belongs to.
    pub fn kind(&self) -> GameKind {
        match self {
            Submission::WordSearch { .. } => GameKind::WordSearch,
            Submission::Hangman { .. } => GameKind::Hangman,
            Submission::CompletePhrase { .. } => GameKind::CompletePhrase,
        }
    }

    /// Returns the hints-used count carried by the submission.
    pub fn hints_used(&self) -> u32 {
        match self {
            Submission::WordSearch { hints_used, .. }
            | Submission::Hangman { hints_used, .. }
            | Submission::CompletePhrase { hints_used, .. } => *hints_used,
        }
    }
}

/// Correctness of one sub-unit (blank, word) inside a validated item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
pub struct SubUnitResult {
    /// Blank id or word index.
    id: u32,
    /// Whether the player got this sub-unit right.
    is_correct: bool,
    /// The expected answer, for reveal.
    #[serde(default)]
    correct_answer: Option<String>,
}

/// Remote-asserted outcome for one item. Authoritative; never altered locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters, new)]
#[setters(prefix = "with_", strip_option)]
pub struct ValidationResult {
    /// Overall correctness of the item.
    #[setters(skip)]
    is_correct: bool,
    /// Points awarded.
    #[setters(skip)]
    score: f64,
    /// Percentage correctness, when the service reports one.
    #[serde(default)]
    #[new(default)]
    percentage: Option<f64>,
    /// Sub-units answered correctly.
    #[serde(default)]
    #[new(default)]
    correct_count: u32,
    /// Sub-units answered incorrectly.
    #[serde(default)]
    #[new(default)]
    incorrect_count: u32,
    /// Per-sub-unit breakdown.
    #[serde(default)]
    #[new(default)]
    details: Vec<SubUnitResult>,
    /// Hangman: letters of the word that were guessed.
    #[serde(default)]
    #[new(default)]
    matched_letters: Vec<char>,
    /// Hangman: wrong guesses counted by the service.
    #[serde(default)]
    #[new(default)]
    errors_count: Option<u32>,
}

impl ValidationResult {
    /// The item's own percentage, or 100/0 from its correctness flag.
    pub fn effective_percentage(&self) -> f64 {
        self.percentage
            .unwrap_or(if self.is_correct { 100.0 } else { 0.0 })
    }

    /// Errors this item contributes to the session total.
    ///
    /// Hangman reports `errors_count`; the other games fall back to the
    /// item's incorrect count.
    pub fn effective_errors(&self) -> u32 {
        self.errors_count.unwrap_or(self.incorrect_count)
    }
}

/// A hint returned by the hint collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct Hint {
    /// Free-text clue.
    #[serde(default)]
    text: Option<String>,
    /// Position of a revealed letter in the answer.
    #[serde(default)]
    revealed_position: Option<usize>,
    /// The revealed letter itself.
    #[serde(default)]
    revealed_letter: Option<char>,
    /// Length of the expected answer.
    #[serde(default)]
    word_length: Option<usize>,
}

