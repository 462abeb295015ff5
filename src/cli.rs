//! Command-line interface for edu_minigames.

use clap::{Parser, Subcommand, ValueEnum};

/// Edu Minigames - play learning mini-games against a game service
#[derive(Parser, Debug)]
#[command(name = "edu_minigames")]
#[command(about = "Session engine for learning mini-games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Which game to play.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameArg {
    /// Find words in a letter grid
    WordSearch,
    /// Guess the hidden word
    Hangman,
    /// Fill in the blanks
    CompletePhrase,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a session interactively, one command per line
    Play {
        /// Game to play
        #[arg(short, long, value_enum)]
        game: GameArg,

        /// Session ID on the game service
        #[arg(short, long)]
        session: String,

        /// Path to the TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Print a completion report when the session ends
        #[arg(long)]
        from_module: bool,
    },

    /// Parse a phrase template and print its nodes
    Template {
        /// Template text, e.g. "El {0} es el rey de la {1}"
        text: String,
    },

    /// Check a grid selection and print the cells it covers
    Path {
        /// Start row
        #[arg(allow_negative_numbers = true)]
        start_row: i32,
        /// Start column
        #[arg(allow_negative_numbers = true)]
        start_col: i32,
        /// End row
        #[arg(allow_negative_numbers = true)]
        end_row: i32,
        /// End column
        #[arg(allow_negative_numbers = true)]
        end_col: i32,
    },

    /// Print the normalized form used for letter comparison
    Normalize {
        /// Text to normalize
        text: String,
    },
}
