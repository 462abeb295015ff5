//! Session controller: the single authority over an item's lifecycle.
//!
//! The controller never performs I/O. Every remote call is split into a
//! `begin_*`/`input`/`submit` step that hands out a request carrying a
//! [`Ticket`], and a `finish_*` step that takes the ticket back along with the
//! collaborator's result. Results whose ticket no longer matches the current
//! state are discarded without touching anything.

use super::aggregate::{AggregatedResult, ResultAggregator};
use super::hints::{HintCoordinator, SubUnit};
use super::report::{CompletionNotifier, CompletionReport};
use super::rules::{Completion, GameRules};
use super::status::SessionStatus;
use super::ticket::{SingleFlight, Ticket};
use crate::error::EngineError;
use crate::model::{Hint, PlayableItem, SessionId, Submission, ValidationResult};
use crate::service::ServiceError;
use derive_getters::Getters;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

/// Request to fetch the item at `item_index`.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct LoadRequest {
    ticket: Ticket,
    session_id: SessionId,
    item_index: usize,
}

/// Request to validate the current item.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct ValidationRequest {
    ticket: Ticket,
    session_id: SessionId,
    item_index: usize,
    submission: Submission,
}

/// Request for a hint on part of the current item.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct HintRequest {
    ticket: Ticket,
    session_id: SessionId,
    item_index: usize,
    unit: SubUnit,
}

/// What happened to a resolved remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The result was applied to the session.
    Applied,
    /// The collaborator failed; the failure was folded into the session.
    Failed,
    /// The result belonged to a superseded state and was dropped.
    Discarded,
}

/// Outcome of one input mutation.
#[derive(Debug)]
pub struct InputOutcome<E> {
    /// Game-specific effect of the input.
    pub effect: E,
    /// Completion predicate evaluated after the input.
    pub completion: Completion,
    /// Validation request issued automatically, if the predicate fired and no
    /// other submission was in flight.
    pub submission: Option<ValidationRequest>,
}

#[derive(Debug)]
struct CurrentItem<R: GameRules> {
    item: R::Item,
    total_items: usize,
    progress: R::Progress,
}

/// Drives one game session through
/// `loading → playing → {word_completed | completed} | error`.
#[derive(Debug)]
pub struct GameSessionController<R: GameRules> {
    rules: R,
    session_id: SessionId,
    status: SessionStatus,
    item_index: usize,
    epoch: u64,
    pending_load: Option<Ticket>,
    current: Option<CurrentItem<R>>,
    hints: HintCoordinator,
    validation: SingleFlight,
    aggregator: ResultAggregator,
    last_result: Option<ValidationResult>,
    summary: Option<AggregatedResult>,
    last_error: Option<String>,
    notifier: CompletionNotifier,
}

impl<R: GameRules> GameSessionController<R> {
    /// Creates a controller in `loading` for the first item of `session_id`.
    #[instrument(skip(rules), fields(game = %rules.kind()))]
    pub fn new(rules: R, session_id: impl Into<SessionId> + std::fmt::Debug) -> Self {
        let session_id = session_id.into();
        info!(session_id = %session_id, "Creating game session controller");
        Self {
            rules,
            session_id,
            status: SessionStatus::Loading,
            item_index: 0,
            epoch: 0,
            pending_load: None,
            current: None,
            hints: HintCoordinator::new(),
            validation: SingleFlight::new(),
            aggregator: ResultAggregator::new(),
            last_result: None,
            summary: None,
            last_error: None,
            notifier: CompletionNotifier::default(),
        }
    }

    /// Marks the session as running inside an enclosing flow.
    ///
    /// When the last item is validated, one [`CompletionReport`] is sent on
    /// `sender`. Standalone sessions report nothing.
    pub fn with_completion_channel(mut self, sender: UnboundedSender<CompletionReport>) -> Self {
        self.notifier = CompletionNotifier::to(sender);
        self
    }

    // ─────────────────────────────────────────────────────────────
    //  Loading
    // ─────────────────────────────────────────────────────────────

    /// Issues the fetch for the current item index.
    ///
    /// Calling it again before the first fetch resolves supersedes that fetch.
    #[instrument(skip(self), fields(session_id = %self.session_id, item_index = self.item_index))]
    pub fn begin_load(&mut self) -> Result<LoadRequest, EngineError> {
        self.require(SessionStatus::Loading, "load an item")?;
        self.epoch += 1;
        let ticket = Ticket::new(self.epoch, self.item_index);
        self.pending_load = Some(ticket);
        debug!(epoch = self.epoch, "Load issued");
        Ok(LoadRequest {
            ticket,
            session_id: self.session_id.clone(),
            item_index: self.item_index,
        })
    }

    /// Applies the result of a fetch issued by [`Self::begin_load`].
    #[instrument(skip(self, result), fields(session_id = %self.session_id))]
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: Result<PlayableItem, ServiceError>,
    ) -> Resolution {
        if self.status != SessionStatus::Loading || self.pending_load != Some(ticket) {
            debug!(ticket = ?ticket, "Discarding stale load result");
            return Resolution::Discarded;
        }
        self.pending_load = None;

        let loaded = result
            .map_err(|e| e.message)
            .and_then(|item| self.accept_item(item).map_err(|e| e.to_string()));

        match loaded {
            Ok(current) => {
                info!(
                    item_index = self.item_index,
                    total_items = current.total_items,
                    "Item loaded"
                );
                self.current = Some(current);
                self.hints.clear();
                self.validation.reset();
                self.last_error = None;
                self.status = SessionStatus::Playing;
                Resolution::Applied
            }
            Err(message) => {
                warn!(item_index = self.item_index, error = %message, "Item failed to load");
                self.current = None;
                self.last_error = Some(message);
                self.status = SessionStatus::Error;
                Resolution::Failed
            }
        }
    }

    fn accept_item(&self, item: PlayableItem) -> Result<CurrentItem<R>, EngineError> {
        if *item.item_index() != self.item_index {
            warn!(
                expected = self.item_index,
                received = *item.item_index(),
                "Service returned a different item index"
            );
        }
        let total_items = (*item.total_items()).max(self.item_index + 1);
        let typed = self.rules.item_from_payload(item.payload().clone())?;
        let progress = self.rules.start(&typed);
        Ok(CurrentItem {
            item: typed,
            total_items,
            progress,
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Playing
    // ─────────────────────────────────────────────────────────────

    /// Applies one player input and evaluates the completion predicate.
    ///
    /// Input is accepted while a validation call is in flight, but no second
    /// call is issued until the first resolves.
    #[instrument(skip(self), fields(session_id = %self.session_id, item_index = self.item_index))]
    pub fn input(&mut self, input: R::Input) -> Result<InputOutcome<R::Effect>, EngineError> {
        self.require(SessionStatus::Playing, "accept input")?;
        let status = self.status;
        let current = self.current.as_mut().ok_or(EngineError::InvalidState {
            operation: "accept input",
            status,
        })?;
        let effect = self
            .rules
            .apply(&current.item, &mut current.progress, input)?;
        let completion = self.rules.completion(&current.item, &current.progress);

        let submission = if completion == Completion::AutoSubmit {
            match self.issue_validation() {
                Ok(request) => {
                    info!("Completion predicate fired; submitting");
                    Some(request)
                }
                Err(EngineError::SubmitInFlight) => None,
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        Ok(InputOutcome {
            effect,
            completion,
            submission,
        })
    }

    /// Explicitly submits the current item.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotReady`] while the completion predicate reports
    /// [`Completion::Incomplete`], [`EngineError::SubmitInFlight`] while a
    /// previous submission has not resolved.
    #[instrument(skip(self), fields(session_id = %self.session_id, item_index = self.item_index))]
    pub fn submit(&mut self) -> Result<ValidationRequest, EngineError> {
        self.require(SessionStatus::Playing, "submit")?;
        if !self.completion().allows_submit() {
            return Err(EngineError::NotReady);
        }
        self.issue_validation()
    }

    fn issue_validation(&mut self) -> Result<ValidationRequest, EngineError> {
        let current = self.current.as_ref().ok_or(EngineError::InvalidState {
            operation: "submit",
            status: self.status,
        })?;
        let ticket = Ticket::new(self.epoch, self.item_index);
        if !self.validation.try_acquire(ticket) {
            return Err(EngineError::SubmitInFlight);
        }
        let submission =
            self.rules
                .build_submission(&current.item, &current.progress, self.hints.used());
        Ok(ValidationRequest {
            ticket,
            session_id: self.session_id.clone(),
            item_index: self.item_index,
            submission,
        })
    }

    /// Applies the result of a validation call.
    ///
    /// A failure keeps the session in `playing` with the player's input intact.
    #[instrument(skip(self, result), fields(session_id = %self.session_id))]
    pub fn finish_validation(
        &mut self,
        ticket: Ticket,
        result: Result<ValidationResult, ServiceError>,
    ) -> Resolution {
        if ticket.epoch() != self.epoch
            || self.status != SessionStatus::Playing
            || !self.validation.release(ticket)
        {
            debug!(ticket = ?ticket, "Discarding stale validation result");
            return Resolution::Discarded;
        }

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Validation failed; staying in play");
                self.last_error = Some(e.message);
                return Resolution::Failed;
            }
        };

        self.last_error = None;
        self.last_result = Some(result.clone());
        self.aggregator.append(result.clone());

        let is_last = self.is_last_item();
        if self.rules.supports_auto_advance() && !is_last {
            info!(item_index = self.item_index, "Item validated; waiting for next");
            self.status = SessionStatus::WordCompleted;
            return Resolution::Applied;
        }

        self.status = SessionStatus::Completed;
        if is_last {
            let summary = self.aggregator.summarize();
            self.summary = Some(summary.clone());
            self.notifier.notify(CompletionReport::new(
                self.session_id.clone(),
                self.rules.kind(),
                result,
                summary,
            ));
        }
        info!(item_index = self.item_index, is_last, "Session completed");
        Resolution::Applied
    }

    // ─────────────────────────────────────────────────────────────
    //  Hints
    // ─────────────────────────────────────────────────────────────

    /// Issues a hint request. Independent of any in-flight validation.
    #[instrument(skip(self), fields(session_id = %self.session_id, item_index = self.item_index))]
    pub fn request_hint(&mut self, unit: SubUnit) -> Result<HintRequest, EngineError> {
        self.require(SessionStatus::Playing, "request a hint")?;
        Ok(HintRequest {
            ticket: Ticket::new(self.epoch, self.item_index),
            session_id: self.session_id.clone(),
            item_index: self.item_index,
            unit,
        })
    }

    /// Merges a resolved hint, unless the item was finalized or replaced.
    ///
    /// Hint failures are logged and otherwise ignored.
    #[instrument(skip(self, result), fields(session_id = %self.session_id))]
    pub fn finish_hint(
        &mut self,
        ticket: Ticket,
        unit: SubUnit,
        result: Result<Hint, ServiceError>,
    ) -> Resolution {
        if ticket.epoch() != self.epoch || self.status != SessionStatus::Playing {
            debug!(ticket = ?ticket, "Discarding stale hint");
            return Resolution::Discarded;
        }
        match result {
            Ok(hint) => {
                self.hints.merge(unit, hint);
                Resolution::Applied
            }
            Err(e) => {
                warn!(error = %e, unit = ?unit, "Hint unavailable");
                Resolution::Failed
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Navigation
    // ─────────────────────────────────────────────────────────────

    /// Moves on to the following item.
    ///
    /// Allowed from `word_completed`, and from `completed` while items remain.
    #[instrument(skip(self), fields(session_id = %self.session_id, item_index = self.item_index))]
    pub fn next(&mut self) -> Result<LoadRequest, EngineError> {
        if !self.can_advance() {
            return Err(EngineError::InvalidState {
                operation: "advance to the next item",
                status: self.status,
            });
        }
        self.item_index += 1;
        self.enter_loading();
        self.begin_load()
    }

    /// Restarts the session.
    ///
    /// From `error` the failed fetch is reissued for the same item. From any
    /// other status the session starts over at the first item with every
    /// accumulated result dropped; calls still in flight become stale.
    #[instrument(skip(self), fields(session_id = %self.session_id, status = %self.status))]
    pub fn retry(&mut self) -> LoadRequest {
        if self.status != SessionStatus::Error {
            self.item_index = 0;
            self.aggregator.clear();
            self.last_result = None;
            self.summary = None;
            self.notifier.rearm();
        }
        self.enter_loading();
        self.epoch += 1;
        let ticket = Ticket::new(self.epoch, self.item_index);
        self.pending_load = Some(ticket);
        info!(item_index = self.item_index, "Retrying");
        LoadRequest {
            ticket,
            session_id: self.session_id.clone(),
            item_index: self.item_index,
        }
    }

    fn enter_loading(&mut self) {
        self.status = SessionStatus::Loading;
        self.current = None;
        self.hints.clear();
        self.validation.reset();
        self.last_error = None;
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// The game rules.
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Session identifier.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Zero-based index of the current item.
    pub fn item_index(&self) -> usize {
        self.item_index
    }

    /// The loaded item, while one is loaded.
    pub fn item(&self) -> Option<&R::Item> {
        self.current.as_ref().map(|c| &c.item)
    }

    /// Player progress on the loaded item.
    pub fn progress(&self) -> Option<&R::Progress> {
        self.current.as_ref().map(|c| &c.progress)
    }

    /// Total items in the session, once an item has been loaded.
    pub fn total_items(&self) -> Option<usize> {
        self.current.as_ref().map(|c| c.total_items)
    }

    /// Completion predicate for the loaded item.
    pub fn completion(&self) -> Completion {
        self.current
            .as_ref()
            .map_or(Completion::Incomplete, |c| {
                self.rules.completion(&c.item, &c.progress)
            })
    }

    /// Hints received for the loaded item.
    pub fn hints(&self) -> &HintCoordinator {
        &self.hints
    }

    /// Returns true while a validation call is in flight.
    pub fn is_submitting(&self) -> bool {
        self.validation.is_busy()
    }

    /// Result of the most recent successful validation.
    pub fn last_result(&self) -> Option<&ValidationResult> {
        self.last_result.as_ref()
    }

    /// Session summary, once the last item has been validated.
    pub fn summary(&self) -> Option<&AggregatedResult> {
        self.summary.as_ref()
    }

    /// Results accumulated in this attempt.
    pub fn results(&self) -> &[ValidationResult] {
        self.aggregator.results()
    }

    /// Message of the last load or validation failure.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns true if an enclosing flow will receive a completion report.
    pub fn reports_completion(&self) -> bool {
        self.notifier.is_attached()
    }

    /// Returns true if [`Self::next`] is currently allowed.
    pub fn can_advance(&self) -> bool {
        match self.status {
            SessionStatus::WordCompleted => true,
            SessionStatus::Completed => !self.is_last_item(),
            _ => false,
        }
    }

    fn is_last_item(&self) -> bool {
        self.current
            .as_ref()
            .is_none_or(|c| self.item_index + 1 >= c.total_items)
    }

    fn require(&self, expected: SessionStatus, operation: &'static str) -> Result<(), EngineError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(EngineError::InvalidState {
                operation,
                status: self.status,
            })
        }
    }
}
