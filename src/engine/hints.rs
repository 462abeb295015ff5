//! Hints attached to sub-units of the current item.

use crate::model::Hint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// An addressable part of an item that a hint can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SubUnit {
    /// The whole item (hangman word, word-search grid).
    Item,
    /// A phrase blank by id.
    Blank(u32),
    /// A word-search word by its index in the word list.
    Word(usize),
}

impl SubUnit {
    /// Identifier sent to the hint collaborator, if the unit has one.
    pub fn remote_id(self) -> Option<String> {
        match self {
            SubUnit::Item => None,
            SubUnit::Blank(id) => Some(id.to_string()),
            SubUnit::Word(index) => Some(index.to_string()),
        }
    }
}

/// Client-side hint cache for the current item.
///
/// Hints never affect local state beyond this cache; the only thing that
/// reaches validation is the count of hints received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintCoordinator {
    hints: BTreeMap<SubUnit, Vec<Hint>>,
    used: u32,
}

impl HintCoordinator {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a received hint into the unit's state.
    #[instrument(skip(self, hint))]
    pub fn merge(&mut self, unit: SubUnit, hint: Hint) {
        self.used += 1;
        self.hints.entry(unit).or_default().push(hint);
        debug!(used = self.used, "Hint merged");
    }

    /// Hints received for `unit`, oldest first.
    pub fn hints_for(&self, unit: SubUnit) -> &[Hint] {
        self.hints.get(&unit).map(Vec::as_slice).unwrap_or_default()
    }

    /// Most recent hint for `unit`.
    pub fn latest(&self, unit: SubUnit) -> Option<&Hint> {
        self.hints_for(unit).last()
    }

    /// Hints received for the current item.
    pub fn used(&self) -> u32 {
        self.used
    }

    /// Forgets all hints; called when an item is loaded.
    pub fn clear(&mut self) {
        self.hints.clear();
        self.used = 0;
    }
}
