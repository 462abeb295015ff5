//! Completion notification sent to an enclosing flow.

use super::aggregate::AggregatedResult;
use crate::model::{GameKind, SessionId, ValidationResult};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// The best available outcome of a finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct CompletionReport {
    /// Session that finished.
    session_id: SessionId,
    /// Game played.
    game: GameKind,
    /// Result of the final validation.
    last_result: ValidationResult,
    /// Fold of every item validated in the session.
    aggregate: AggregatedResult,
}

impl CompletionReport {
    pub(crate) fn new(
        session_id: SessionId,
        game: GameKind,
        last_result: ValidationResult,
        aggregate: AggregatedResult,
    ) -> Self {
        Self {
            session_id,
            game,
            last_result,
            aggregate,
        }
    }
}

/// Sends at most one report per session to the enclosing flow.
#[derive(Debug, Clone, Default)]
pub(crate) struct CompletionNotifier {
    sender: Option<UnboundedSender<CompletionReport>>,
    sent: bool,
}

impl CompletionNotifier {
    /// A notifier that reports to `sender`.
    pub(crate) fn to(sender: UnboundedSender<CompletionReport>) -> Self {
        Self {
            sender: Some(sender),
            sent: false,
        }
    }

    /// Returns true if an enclosing flow asked for the report.
    pub(crate) fn is_attached(&self) -> bool {
        self.sender.is_some()
    }

    /// Sends the report unless one was already sent or nobody listens.
    pub(crate) fn notify(&mut self, report: CompletionReport) {
        let Some(sender) = &self.sender else {
            debug!("Standalone session; completion not reported");
            return;
        };
        if self.sent {
            debug!("Completion already reported");
            return;
        }
        self.sent = true;
        match sender.send(report) {
            Ok(()) => info!("Completion reported to enclosing flow"),
            Err(_) => warn!("Enclosing flow stopped listening for completion"),
        }
    }

    /// Allows a new report; called when the session restarts.
    pub(crate) fn rearm(&mut self) {
        self.sent = false;
    }
}
