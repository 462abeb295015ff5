//! Edu Minigames - session engine for embedded learning games
//!
//! Drives word-search, hangman and complete-the-phrase sessions against a
//! remote game service, independent of any rendering.
//!
//! # Architecture
//!
//! - **Engine**: sans-IO session controller, single-flight submission guard,
//!   stale-result tickets, hint cache and result aggregation
//! - **Games**: per-game rules plugged into the controller
//! - **Service**: the remote collaborators (item fetch, hints, validation)
//! - **Text**: letter normalization shared by the games
//!
//! # Example
//!
//! ```no_run
//! use edu_minigames::{EngineConfig, GameSessionController, HangmanRules, HttpGameService, SessionDriver};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = EngineConfig::default();
//! let service = HttpGameService::new(config.service())?;
//! let controller = GameSessionController::new(HangmanRules, "session-1");
//!
//! let mut driver = SessionDriver::new(controller, service);
//! driver.load().await?;
//! driver.input('a').await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod engine;
mod error;
mod model;
mod service;

// Public module declarations
pub mod games;
pub mod text;

// Crate-level exports - Configuration
pub use config::{BASE_URL_ENV, ConfigError, EngineConfig, ServiceConfig, SessionConfig};

// Crate-level exports - Engine
pub use engine::{
    AggregatedResult, Completion, CompletionReport, GameRules, GameSessionController,
    HintCoordinator, HintRequest, InputOutcome, LoadRequest, Resolution, ResultAggregator,
    SessionDriver, SessionStatus, SingleFlight, SubUnit, Ticket, ValidationRequest,
};

// Crate-level exports - Errors
pub use error::EngineError;

// Crate-level exports - Data model
pub use model::{
    Blank, BlankAnswer, BlankKind, GameKind, Hint, ItemPayload, PlayableItem, SessionId,
    SubUnitResult, Submission, ValidationResult,
};

// Crate-level exports - Remote collaborators
pub use service::{GameService, HttpGameService, ServiceError};

// Crate-level exports - Game rules
pub use games::complete_phrase::CompletePhraseRules;
pub use games::hangman::HangmanRules;
pub use games::word_search::WordSearchRules;
