//! Edu Minigames - Unified CLI
//!
//! Interactive play against a game service plus a few inspection commands.

#![warn(missing_docs)]

mod cli;
mod play;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, GameArg};
use edu_minigames::games::complete_phrase::parse_template;
use edu_minigames::games::word_search::{CellPosition, expand_path, is_straight_line};
use edu_minigames::text::normalize_text;
use edu_minigames::{
    CompletePhraseRules, EngineConfig, GameSessionController, HangmanRules, HttpGameService,
    SessionDriver, WordSearchRules,
};
use play::ConsoleGame;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            game,
            session,
            config,
            from_module,
        } => run_play(game, session, config, from_module).await,
        Command::Template { text } => {
            println!("{}", serde_json::to_string(&parse_template(&text))?);
            Ok(())
        }
        Command::Path {
            start_row,
            start_col,
            end_row,
            end_col,
        } => {
            let start = CellPosition::new(start_row, start_col);
            let end = CellPosition::new(end_row, end_col);
            if is_straight_line(start, end) {
                let cells: Vec<String> = expand_path(start, end).iter().map(|c| c.to_string()).collect();
                println!("{}", cells.join(" "));
            } else {
                println!("not a straight line");
            }
            Ok(())
        }
        Command::Normalize { text } => {
            println!("{}", normalize_text(&text));
            Ok(())
        }
    }
}

/// Run an interactive session
async fn run_play(
    game: GameArg,
    session: String,
    config_path: Option<PathBuf>,
    from_module: bool,
) -> Result<()> {
    let config = EngineConfig::load(config_path.as_deref())?;
    let config = if from_module {
        config.with_from_module(true)
    } else {
        config
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(game = ?game, session = %session, "Starting session");

    match game {
        GameArg::Hangman => play_with(HangmanRules, session, &config).await,
        GameArg::WordSearch => play_with(WordSearchRules, session, &config).await,
        GameArg::CompletePhrase => play_with(CompletePhraseRules, session, &config).await,
    }
}

#[instrument(skip(rules, config))]
async fn play_with<R: ConsoleGame>(rules: R, session: String, config: &EngineConfig) -> Result<()> {
    let service = HttpGameService::new(config.service())?;
    let controller = GameSessionController::new(rules, session);

    if !*config.session().from_module() {
        return play::run(SessionDriver::new(controller, service)).await;
    }

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let controller = controller.with_completion_channel(tx);
    play::run(SessionDriver::new(controller, service)).await?;

    while let Ok(report) = rx.try_recv() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
