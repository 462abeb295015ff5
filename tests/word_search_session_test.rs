//! Tests for word-search sessions driven through the controller.

use edu_minigames::games::word_search::{CellPosition, DragSelection, SelectionEffect, WordSearchInput};
use edu_minigames::{
    Completion, EngineError, GameSessionController, ItemPayload, PlayableItem, Resolution,
    SessionStatus, Submission, ValidationResult, WordSearchRules,
};
use std::time::{Duration, Instant};

fn cell(row: i32, col: i32) -> CellPosition {
    CellPosition::new(row, col)
}

fn grid_item(case_sensitive: bool) -> PlayableItem {
    PlayableItem::new(
        0,
        1,
        ItemPayload::WordSearch {
            grid: vec![
                vec!['G', 'A', 'T', 'O'],
                vec!['X', 'S', 'O', 'L'],
                vec!['P', 'E', 'Z', 'M'],
                vec!['R', 'A', 'N', 'A'],
            ],
            words: vec!["gato".to_string(), "sol".to_string(), "ANAR".to_string()],
            case_sensitive,
        },
    )
}

fn loaded(case_sensitive: bool) -> GameSessionController<WordSearchRules> {
    let mut controller = GameSessionController::new(WordSearchRules, "grid-1");
    let request = controller.begin_load().unwrap();
    controller.finish_load(*request.ticket(), Ok(grid_item(case_sensitive)));
    assert_eq!(controller.status(), SessionStatus::Playing);
    controller
}

fn select(
    controller: &mut GameSessionController<WordSearchRules>,
    start: CellPosition,
    end: CellPosition,
) -> SelectionEffect {
    let outcome = controller
        .input(WordSearchInput::Select { start, end })
        .expect("Selection accepted");
    assert!(outcome.submission.is_none(), "Word search never auto-submits");
    outcome.effect
}

#[test]
fn test_find_words_in_both_directions() {
    let mut controller = loaded(false);

    assert!(matches!(
        select(&mut controller, cell(0, 0), cell(0, 3)),
        SelectionEffect::Found(w) if w.word() == "gato"
    ));
    // Row 3 reads "RANA"; dragged right to left it spells the listed "ANAR".
    assert!(matches!(
        select(&mut controller, cell(3, 3), cell(3, 0)),
        SelectionEffect::Found(w) if w.word() == "ANAR"
    ));
    assert_eq!(controller.progress().map(|f| f.len()), Some(2));
}

#[test]
fn test_retrace_is_noop() {
    let mut controller = loaded(false);
    select(&mut controller, cell(1, 1), cell(1, 3));
    assert_eq!(
        select(&mut controller, cell(1, 1), cell(1, 3)),
        SelectionEffect::AlreadyFound
    );
    assert_eq!(controller.progress().map(|f| f.len()), Some(1));
}

#[test]
fn test_case_sensitive_grid() {
    let mut controller = loaded(true);
    assert_eq!(
        select(&mut controller, cell(0, 0), cell(0, 3)),
        SelectionEffect::NoMatch
    );
    assert!(matches!(
        select(&mut controller, cell(3, 0), cell(3, 3)),
        SelectionEffect::Found(_)
    ));
}

#[test]
fn test_crooked_selection_does_not_match() {
    let mut controller = loaded(false);
    assert_eq!(
        select(&mut controller, cell(0, 0), cell(1, 3)),
        SelectionEffect::NoMatch
    );
}

#[test]
fn test_off_grid_selection_is_rejected_cheaply() {
    let mut controller = loaded(false);
    let started = Instant::now();

    assert_eq!(
        select(&mut controller, cell(i32::MIN, 0), cell(i32::MAX, 0)),
        SelectionEffect::NoMatch
    );
    assert_eq!(
        select(&mut controller, cell(0, 0), cell(0, 100_000_000)),
        SelectionEffect::NoMatch
    );
    assert_eq!(
        select(&mut controller, cell(i32::MAX, i32::MAX), cell(i32::MIN, i32::MIN)),
        SelectionEffect::NoMatch
    );

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(controller.status(), SessionStatus::Playing);
    assert!(controller.progress().is_some_and(|f| f.is_empty()));
}

#[test]
fn test_submit_requires_a_found_word() {
    let mut controller = loaded(false);
    assert_eq!(controller.completion(), Completion::Incomplete);
    assert_eq!(controller.submit(), Err(EngineError::NotReady));

    select(&mut controller, cell(1, 1), cell(1, 3));
    assert_eq!(controller.completion(), Completion::SubmitEnabled);

    let request = controller.submit().expect("Submit enabled");
    match request.submission() {
        Submission::WordSearch { found_words, .. } => {
            assert_eq!(found_words.len(), 1);
            assert_eq!(found_words[0].word(), "sol");
            assert_eq!(*found_words[0].start(), cell(1, 1));
            assert_eq!(*found_words[0].end(), cell(1, 3));
        }
        other => panic!("Unexpected submission {:?}", other),
    }
    assert_eq!(controller.submit(), Err(EngineError::SubmitInFlight));

    let result = ValidationResult::new(true, 30.0)
        .with_correct_count(1)
        .with_incorrect_count(2);
    assert_eq!(
        controller.finish_validation(*request.ticket(), Ok(result)),
        Resolution::Applied
    );
    assert_eq!(controller.status(), SessionStatus::Completed);
    assert!(!controller.can_advance());

    let summary = controller.summary().expect("Single grid is the whole session");
    assert_eq!(*summary.total_errors(), 2);
    assert_eq!(*summary.percentage(), 100.0);
}

#[test]
fn test_drag_feeds_selection() {
    let mut controller = loaded(false);
    let mut drag = DragSelection::new();

    drag.begin(cell(0, 0));
    drag.move_to(cell(0, 1));
    drag.move_to(cell(1, 2)); // off the line from (0, 0); ignored
    drag.move_to(cell(0, 3));
    let (start, end) = drag.end().expect("Drag was active");

    assert!(matches!(
        select(&mut controller, start, end),
        SelectionEffect::Found(_)
    ));
    let found = controller.progress().unwrap();
    assert!(found.contains_cell(cell(0, 2)));
    assert!(!found.contains_cell(cell(1, 2)));
}
