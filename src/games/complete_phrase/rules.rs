//! Complete-the-phrase strategy: fill every blank, then submit explicitly.

use super::template::PhraseLayout;
use crate::engine::{Completion, GameRules, payload_mismatch};
use crate::error::EngineError;
use crate::model::{Blank, BlankAnswer, GameKind, ItemPayload, Submission};
use derive_getters::Getters;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// A loaded phrase.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PhraseItem {
    template: String,
    blanks: Vec<Blank>,
}

impl PhraseItem {
    /// Lays the template out against this item's blanks.
    pub fn layout(&self) -> PhraseLayout {
        PhraseLayout::build(&self.template, &self.blanks)
    }

    fn blank(&self, id: u32) -> Option<&Blank> {
        self.blanks.iter().find(|b| *b.id() == id)
    }
}

/// Answers entered for the current phrase, one per blank id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseAnswers {
    answers: BTreeMap<u32, String>,
}

impl PhraseAnswers {
    /// Answer for `blank_id`, if any.
    pub fn get(&self, blank_id: u32) -> Option<&str> {
        self.answers.get(&blank_id).map(String::as_str)
    }

    /// Returns true if `blank_id` has a non-empty answer.
    pub fn is_filled(&self, blank_id: u32) -> bool {
        self.get(blank_id).is_some_and(|a| !a.is_empty())
    }
}

/// Input for a phrase item: set or overwrite the answer to one blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetAnswer {
    /// Target blank.
    pub blank_id: u32,
    /// New value; replaces any previous answer.
    pub value: String,
}

impl SetAnswer {
    /// Creates an answer input.
    pub fn new(blank_id: u32, value: impl Into<String>) -> Self {
        Self {
            blank_id,
            value: value.into(),
        }
    }
}

/// Complete-the-phrase rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletePhraseRules;

impl GameRules for CompletePhraseRules {
    type Item = PhraseItem;
    type Progress = PhraseAnswers;
    type Input = SetAnswer;
    type Effect = ();

    fn kind(&self) -> GameKind {
        GameKind::CompletePhrase
    }

    fn item_from_payload(&self, payload: ItemPayload) -> Result<Self::Item, EngineError> {
        match payload {
            ItemPayload::CompletePhrase { template, blanks } => Ok(PhraseItem { template, blanks }),
            other => Err(payload_mismatch(GameKind::CompletePhrase, &other)),
        }
    }

    fn start(&self, item: &Self::Item) -> Self::Progress {
        PhraseAnswers {
            answers: item
                .blanks
                .iter()
                .map(|b| (*b.id(), String::new()))
                .collect(),
        }
    }

    #[instrument(skip(self, item, progress))]
    fn apply(
        &self,
        item: &Self::Item,
        progress: &mut Self::Progress,
        input: Self::Input,
    ) -> Result<Self::Effect, EngineError> {
        let blank = item
            .blank(input.blank_id)
            .ok_or(EngineError::UnknownBlank(input.blank_id))?;

        if blank.kind().uses_options()
            && !input.value.is_empty()
            && !blank.options().contains(&input.value)
        {
            return Err(EngineError::InvalidInput(format!(
                "'{}' is not an option for blank {}",
                input.value, input.blank_id
            )));
        }

        debug!(blank_id = input.blank_id, "Answer set");
        progress.answers.insert(input.blank_id, input.value);
        Ok(())
    }

    fn completion(&self, item: &Self::Item, progress: &Self::Progress) -> Completion {
        if item.blanks.iter().all(|b| progress.is_filled(*b.id())) {
            Completion::SubmitEnabled
        } else {
            Completion::Incomplete
        }
    }

    fn build_submission(
        &self,
        item: &Self::Item,
        progress: &Self::Progress,
        hints_used: u32,
    ) -> Submission {
        let answers = item
            .blanks
            .iter()
            .map(|b| BlankAnswer::new(*b.id(), progress.get(*b.id()).unwrap_or_default().to_string()))
            .collect();
        Submission::CompletePhrase {
            answers,
            hints_used,
        }
    }

    fn supports_auto_advance(&self) -> bool {
        false
    }
}
