//! Phrase template parsing and layout.

use crate::model::Blank;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One node of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateNode {
    /// Literal text between markers.
    Text(String),
    /// A `{n}` marker referring to blank `n`.
    Blank(u32),
}

/// Splits a template into literal runs and blank markers, left to right.
///
/// `{` starts a marker that runs to the next `}` (or the end of the text).
/// Numeric markers become [`TemplateNode::Blank`]; anything else between the
/// braces is dropped. Indices are not checked against any blank list.
#[instrument]
pub fn parse_template(template: &str) -> Vec<TemplateNode> {
    let mut nodes = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '{' {
            literal.push(c);
            continue;
        }

        let marker: String = chars.by_ref().take_while(|&c| c != '}').collect();
        match marker.trim().parse::<u32>() {
            Ok(index) => {
                if !literal.is_empty() {
                    nodes.push(TemplateNode::Text(std::mem::take(&mut literal)));
                }
                nodes.push(TemplateNode::Blank(index));
            }
            Err(_) => debug!(marker = %marker, "Ignoring non-numeric marker"),
        }
    }

    if !literal.is_empty() {
        nodes.push(TemplateNode::Text(literal));
    }
    nodes
}

/// A renderable piece of a phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhraseSegment {
    /// Literal text.
    Text(String),
    /// A fill-in slot. `blank` is `None` when the template names an index the
    /// item does not define; such slots render empty.
    Slot {
        /// Index from the template marker.
        index: u32,
        /// Matching blank definition, if any.
        blank: Option<Blank>,
    },
}

/// A parsed template joined with the item's blank definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseLayout {
    segments: Vec<PhraseSegment>,
}

impl PhraseLayout {
    /// Lays out `template` against `blanks`.
    #[instrument(skip(blanks))]
    pub fn build(template: &str, blanks: &[Blank]) -> Self {
        let segments = parse_template(template)
            .into_iter()
            .map(|node| match node {
                TemplateNode::Text(text) => PhraseSegment::Text(text),
                TemplateNode::Blank(index) => PhraseSegment::Slot {
                    index,
                    blank: blanks.iter().find(|b| *b.id() == index).cloned(),
                },
            })
            .collect();
        Self { segments }
    }

    /// Segments in display order.
    pub fn segments(&self) -> &[PhraseSegment] {
        &self.segments
    }

    /// Number of slots whose index has no blank definition.
    pub fn unlabeled_slots(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, PhraseSegment::Slot { blank: None, .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlankKind;

    fn text(s: &str) -> TemplateNode {
        TemplateNode::Text(s.to_string())
    }

    #[test]
    fn test_parse_two_blanks() {
        assert_eq!(
            parse_template("El {0} es el rey de la {1}"),
            vec![
                text("El "),
                TemplateNode::Blank(0),
                text(" es el rey de la "),
                TemplateNode::Blank(1),
            ]
        );
    }

    #[test]
    fn test_parse_without_blanks() {
        assert_eq!(parse_template("sin blancos"), vec![text("sin blancos")]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_template("").is_empty());
    }

    #[test]
    fn test_adjacent_markers() {
        assert_eq!(
            parse_template("{0}{1}."),
            vec![TemplateNode::Blank(0), TemplateNode::Blank(1), text(".")]
        );
    }

    #[test]
    fn test_non_numeric_marker_is_dropped() {
        assert_eq!(parse_template("a {x} b"), vec![text("a  b")]);
    }

    #[test]
    fn test_unterminated_marker() {
        assert_eq!(parse_template("fin {3"), vec![text("fin "), TemplateNode::Blank(3)]);
    }

    #[test]
    fn test_layout_tolerates_unknown_index() {
        let blanks = vec![Blank::new(0, BlankKind::Text, vec![])];
        let layout = PhraseLayout::build("{0} y {7}", &blanks);
        assert_eq!(layout.segments().len(), 3);
        assert_eq!(layout.unlabeled_slots(), 1);
        assert!(matches!(
            &layout.segments()[2],
            PhraseSegment::Slot { index: 7, blank: None }
        ));
    }
}
