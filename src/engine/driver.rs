//! Async driver pairing a controller with a [`GameService`].

use super::controller::{GameSessionController, Resolution, ValidationRequest};
use super::hints::SubUnit;
use super::rules::GameRules;
use crate::error::EngineError;
use crate::service::GameService;
use tracing::{debug, instrument};

/// Runs controller requests against a service, one at a time.
///
/// Each call awaits its remote operation before returning, so the driver
/// never holds two requests open. Interleavings (a hint racing a validation,
/// a stale load) are exercised through [`GameSessionController`] directly.
#[derive(Debug)]
pub struct SessionDriver<R: GameRules, S: GameService> {
    controller: GameSessionController<R>,
    service: S,
}

impl<R: GameRules, S: GameService> SessionDriver<R, S> {
    /// Wraps a controller and a service.
    pub fn new(controller: GameSessionController<R>, service: S) -> Self {
        Self {
            controller,
            service,
        }
    }

    /// The wrapped controller.
    pub fn controller(&self) -> &GameSessionController<R> {
        &self.controller
    }

    /// The wrapped service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Loads the current item.
    #[instrument(skip(self), fields(session_id = %self.controller.session_id()))]
    pub async fn load(&mut self) -> Result<Resolution, EngineError> {
        let request = self.controller.begin_load()?;
        let result = self
            .service
            .fetch_playable_item(request.session_id(), *request.item_index())
            .await;
        Ok(self.controller.finish_load(*request.ticket(), result))
    }

    /// Applies an input and, if it triggered a submission, validates it.
    #[instrument(skip(self), fields(session_id = %self.controller.session_id()))]
    pub async fn input(&mut self, input: R::Input) -> Result<R::Effect, EngineError> {
        let outcome = self.controller.input(input)?;
        if let Some(request) = outcome.submission {
            let resolution = self.validate(request).await;
            debug!(resolution = ?resolution, "Automatic submission resolved");
        }
        Ok(outcome.effect)
    }

    /// Submits the current item explicitly.
    #[instrument(skip(self), fields(session_id = %self.controller.session_id()))]
    pub async fn submit(&mut self) -> Result<Resolution, EngineError> {
        let request = self.controller.submit()?;
        Ok(self.validate(request).await)
    }

    /// Requests a hint and merges it.
    #[instrument(skip(self), fields(session_id = %self.controller.session_id()))]
    pub async fn hint(&mut self, unit: SubUnit) -> Result<Resolution, EngineError> {
        let request = self.controller.request_hint(unit)?;
        let result = self
            .service
            .fetch_hint(request.session_id(), *request.item_index(), *request.unit())
            .await;
        Ok(self
            .controller
            .finish_hint(*request.ticket(), *request.unit(), result))
    }

    /// Advances to the next item and loads it.
    #[instrument(skip(self), fields(session_id = %self.controller.session_id()))]
    pub async fn next(&mut self) -> Result<Resolution, EngineError> {
        let request = self.controller.next()?;
        let result = self
            .service
            .fetch_playable_item(request.session_id(), *request.item_index())
            .await;
        Ok(self.controller.finish_load(*request.ticket(), result))
    }

    /// Restarts the session and loads its first item (or the failed one).
    #[instrument(skip(self), fields(session_id = %self.controller.session_id()))]
    pub async fn retry(&mut self) -> Resolution {
        let request = self.controller.retry();
        let result = self
            .service
            .fetch_playable_item(request.session_id(), *request.item_index())
            .await;
        self.controller.finish_load(*request.ticket(), result)
    }

    async fn validate(&mut self, request: ValidationRequest) -> Resolution {
        let result = self
            .service
            .validate_attempt(
                request.session_id(),
                *request.item_index(),
                request.submission(),
            )
            .await;
        self.controller.finish_validation(*request.ticket(), result)
    }
}
