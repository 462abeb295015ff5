//! Complete the phrase: fill numbered blanks in a phrase template.

mod rules;
mod template;

pub use rules::{CompletePhraseRules, PhraseAnswers, PhraseItem, SetAnswer};
pub use template::{PhraseLayout, PhraseSegment, TemplateNode, parse_template};
