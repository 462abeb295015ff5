//! Game-agnostic session engine.

mod aggregate;
mod controller;
mod driver;
mod hints;
mod report;
mod rules;
mod status;
mod ticket;

pub use aggregate::{AggregatedResult, ResultAggregator};
pub use controller::{
    GameSessionController, HintRequest, InputOutcome, LoadRequest, Resolution, ValidationRequest,
};
pub use driver::SessionDriver;
pub use hints::{HintCoordinator, SubUnit};
pub use report::CompletionReport;
pub use rules::{Completion, GameRules};
pub(crate) use rules::payload_mismatch;
pub use status::SessionStatus;
pub use ticket::{SingleFlight, Ticket};
