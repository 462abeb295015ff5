//! Line-driven interactive play for the three games.

use anyhow::Result;
use edu_minigames::games::complete_phrase::{PhraseSegment, SetAnswer};
use edu_minigames::games::hangman::HangmanRules;
use edu_minigames::games::word_search::{CellPosition, WordSearchInput};
use edu_minigames::{
    CompletePhraseRules, GameRules, GameService, GameSessionController, SessionDriver,
    SessionStatus, SubUnit, WordSearchRules,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument};

/// One parsed line of player input.
#[derive(Debug)]
enum Action<I> {
    Input(I),
    Submit,
    Hint(SubUnit),
    Next,
    Retry,
    Quit,
}

/// Game-specific console behavior.
pub trait ConsoleGame: GameRules + Sized {
    /// Usage line shown while playing.
    const USAGE: &'static str;

    /// Parses a game input from a line that is not a shared command.
    fn parse_input(line: &str) -> Option<Self::Input>;

    /// Parses the argument of `hint`.
    fn parse_hint(arg: &str) -> SubUnit;

    /// Renders the loaded item and progress.
    fn render(controller: &GameSessionController<Self>) -> String;
}

impl ConsoleGame for HangmanRules {
    const USAGE: &'static str = "<letter> | hint | next | retry | quit";

    fn parse_input(line: &str) -> Option<char> {
        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    fn parse_hint(_arg: &str) -> SubUnit {
        SubUnit::Item
    }

    fn render(controller: &GameSessionController<Self>) -> String {
        let (Some(item), Some(progress)) = (controller.item(), controller.progress()) else {
            return String::new();
        };
        let mut out = format!(
            "{}  (attempts left: {})",
            progress.masked_word('_'),
            HangmanRules::remaining_attempts(item, progress)
        );
        if let Some(category) = item.category() {
            out.push_str(&format!("\ncategory: {}", category));
        }
        if !progress.guessed().is_empty() {
            let guessed: String = progress.guessed().iter().collect();
            out.push_str(&format!("\nguessed: {}", guessed));
        }
        out
    }
}

impl ConsoleGame for WordSearchRules {
    const USAGE: &'static str = "<row> <col> <row> <col> | submit | hint [word] | retry | quit";

    fn parse_input(line: &str) -> Option<WordSearchInput> {
        let numbers: Vec<i32> = line
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<_, _>>()
            .ok()?;
        match numbers.as_slice() {
            [r1, c1, r2, c2] => Some(WordSearchInput::Select {
                start: CellPosition::new(*r1, *c1),
                end: CellPosition::new(*r2, *c2),
            }),
            _ => None,
        }
    }

    fn parse_hint(arg: &str) -> SubUnit {
        arg.parse().map(SubUnit::Word).unwrap_or(SubUnit::Item)
    }

    fn render(controller: &GameSessionController<Self>) -> String {
        let (Some(item), Some(found)) = (controller.item(), controller.progress()) else {
            return String::new();
        };
        let mut out = String::new();
        for (row, letters) in item.grid().rows().iter().enumerate() {
            for (col, letter) in letters.iter().enumerate() {
                let cell = CellPosition::new(row as i32, col as i32);
                if found.contains_cell(cell) {
                    out.push_str(&format!("[{}]", letter));
                } else {
                    out.push_str(&format!(" {} ", letter));
                }
            }
            out.push('\n');
        }
        let words: Vec<String> = item
            .words()
            .iter()
            .map(|w| {
                if found.contains_word(w) {
                    format!("*{}*", w)
                } else {
                    w.clone()
                }
            })
            .collect();
        out.push_str(&format!("words: {}", words.join(", ")));
        out
    }
}

impl ConsoleGame for CompletePhraseRules {
    const USAGE: &'static str = "<blank id> <answer> | submit | hint <blank id> | next | retry | quit";

    fn parse_input(line: &str) -> Option<SetAnswer> {
        let (id, value) = line.split_once(' ')?;
        Some(SetAnswer::new(id.parse().ok()?, value.trim()))
    }

    fn parse_hint(arg: &str) -> SubUnit {
        arg.parse().map(SubUnit::Blank).unwrap_or(SubUnit::Item)
    }

    fn render(controller: &GameSessionController<Self>) -> String {
        let (Some(item), Some(answers)) = (controller.item(), controller.progress()) else {
            return String::new();
        };
        let mut out = String::new();
        for segment in item.layout().segments() {
            match segment {
                PhraseSegment::Text(text) => out.push_str(text),
                PhraseSegment::Slot { index, blank } => match (blank, answers.get(*index)) {
                    (Some(_), Some(answer)) if !answer.is_empty() => {
                        out.push_str(&format!("[{}:{}]", index, answer))
                    }
                    (Some(_), _) => out.push_str(&format!("[{}:____]", index)),
                    (None, _) => out.push_str("[____]"),
                },
            }
        }
        for blank in item.blanks().iter().filter(|b| b.kind().uses_options()) {
            out.push_str(&format!("\n{} options: {}", blank.id(), blank.options().join(" / ")));
        }
        out
    }
}

fn parse_line<R: ConsoleGame>(line: &str) -> Option<Action<R::Input>> {
    let line = line.trim();
    let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
    match head {
        "quit" | "exit" => Some(Action::Quit),
        "submit" => Some(Action::Submit),
        "next" => Some(Action::Next),
        "retry" => Some(Action::Retry),
        "hint" => Some(Action::Hint(R::parse_hint(rest.trim()))),
        _ => R::parse_input(line).map(Action::Input),
    }
}

fn print_state<R: ConsoleGame>(controller: &GameSessionController<R>) {
    match controller.status() {
        SessionStatus::Playing => {
            println!("\n{}", R::render(controller));
            if let Some(hint) = controller
                .hints()
                .latest(SubUnit::Item)
                .and_then(|h| h.text().clone())
            {
                println!("hint: {}", hint);
            }
        }
        SessionStatus::WordCompleted => {
            if let Some(result) = controller.last_result() {
                println!(
                    "\nWord {}! score {}. Type `next` to continue.",
                    if *result.is_correct() { "solved" } else { "missed" },
                    result.score()
                );
            }
        }
        SessionStatus::Completed => {
            if let Some(summary) = controller.summary() {
                println!(
                    "\nSession complete: score {}, {} correct, {} errors, {}%",
                    summary.total_score(),
                    summary.total_correct(),
                    summary.total_errors(),
                    summary.percentage()
                );
            } else if let Some(result) = controller.last_result() {
                println!("\nItem complete: score {}. Type `next` to continue.", result.score());
            }
        }
        SessionStatus::Error => println!("\nCould not load the item. Type `retry`."),
        SessionStatus::Loading => {}
    }
    if let Some(error) = controller.last_error() {
        println!("error: {}", error);
    }
}

/// Plays a session until the player quits or stdin closes.
#[instrument(skip(driver), fields(session_id = %driver.controller().session_id()))]
pub async fn run<R, S>(mut driver: SessionDriver<R, S>) -> Result<()>
where
    R: ConsoleGame,
    S: GameService,
{
    println!("{}", R::USAGE);
    driver.load().await?;
    print_state(driver.controller());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(action) = parse_line::<R>(&line) else {
            println!("usage: {}", R::USAGE);
            continue;
        };
        debug!(action = ?action, "Player action");

        let outcome = match action {
            Action::Quit => break,
            Action::Input(input) => driver.input(input).await.map(|effect| {
                debug!(effect = ?effect, "Input applied");
            }),
            Action::Submit => driver.submit().await.map(drop),
            Action::Hint(unit) => driver.hint(unit).await.map(drop),
            Action::Next => driver.next().await.map(drop),
            Action::Retry => {
                driver.retry().await;
                Ok(())
            }
        };
        if let Err(e) = outcome {
            println!("{}", e);
        }
        print_state(driver.controller());
    }
    Ok(())
}
