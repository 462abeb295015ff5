//! Remote collaborators consumed by the engine.

use crate::config::ServiceConfig;
use crate::engine::SubUnit;
use crate::model::{Hint, PlayableItem, Submission, ValidationResult};
use derive_more::{Display, Error};
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// A collaborator call that rejected.
#[derive(Debug, Clone, Display, Error)]
#[display("Service error: {} at {}:{}", message, file, line)]
pub struct ServiceError {
    /// Error message, shown to the player for load and validation failures.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ServiceError {
    /// Creates a new service error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("Request failed: {}", err))
    }
}

/// The three remote operations a session depends on.
#[async_trait::async_trait]
pub trait GameService: Send + Sync {
    /// Fetches the item at `item_index` of `session_id`.
    async fn fetch_playable_item(
        &self,
        session_id: &str,
        item_index: usize,
    ) -> Result<PlayableItem, ServiceError>;

    /// Fetches a hint, optionally for one sub-unit of the item.
    async fn fetch_hint(
        &self,
        session_id: &str,
        item_index: usize,
        unit: SubUnit,
    ) -> Result<Hint, ServiceError>;

    /// Validates an attempt at the item.
    async fn validate_attempt(
        &self,
        session_id: &str,
        item_index: usize,
        submission: &Submission,
    ) -> Result<ValidationResult, ServiceError>;
}

/// [`GameService`] over a JSON HTTP API.
///
/// Routes, relative to the base URL:
/// - `GET  /api/sessions/{id}/items/{index}`
/// - `GET  /api/sessions/{id}/items/{index}/hint[?sub_unit=..]`
/// - `POST /api/sessions/{id}/items/{index}/attempts`
///
/// The session id is percent-encoded as a single path segment.
#[derive(Debug, Clone)]
pub struct HttpGameService {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpGameService {
    /// Creates a client for the configured service.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        info!("Creating HTTP game service client");
        let base_url = Url::parse(config.base_url())
            .map_err(|e| ServiceError::new(format!("Invalid base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::new(format!(
                "Base URL cannot hold a path: {}",
                base_url
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()?;
        Ok(Self { base_url, client })
    }

    fn endpoint(
        &self,
        session_id: &str,
        item_index: usize,
        tail: Option<&str>,
    ) -> Result<Url, ServiceError> {
        let index = item_index.to_string();
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ServiceError::new("Base URL cannot hold a path"))?;
            segments
                .pop_if_empty()
                .extend(["api", "sessions", session_id, "items", index.as_str()]);
            if let Some(tail) = tail {
                segments.push(tail);
            }
        }
        Ok(url)
    }

    fn item_request(
        &self,
        session_id: &str,
        item_index: usize,
    ) -> Result<reqwest::Request, ServiceError> {
        let url = self.endpoint(session_id, item_index, None)?;
        Ok(self.client.get(url).build()?)
    }

    fn hint_request(
        &self,
        session_id: &str,
        item_index: usize,
        unit: SubUnit,
    ) -> Result<reqwest::Request, ServiceError> {
        let url = self.endpoint(session_id, item_index, Some("hint"))?;
        let mut request = self.client.get(url);
        if let Some(id) = unit.remote_id() {
            request = request.query(&[("sub_unit", id)]);
        }
        Ok(request.build()?)
    }

    fn attempt_request(
        &self,
        session_id: &str,
        item_index: usize,
        submission: &Submission,
    ) -> Result<reqwest::Request, ServiceError> {
        let url = self.endpoint(session_id, item_index, Some("attempts"))?;
        Ok(self.client.post(url).json(submission).build()?)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::new(if body.is_empty() {
                format!("Server responded with {}", status)
            } else {
                body
            }));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl GameService for HttpGameService {
    #[instrument(skip(self))]
    async fn fetch_playable_item(
        &self,
        session_id: &str,
        item_index: usize,
    ) -> Result<PlayableItem, ServiceError> {
        debug!("Fetching playable item");
        let request = self.item_request(session_id, item_index)?;
        let response = self.client.execute(request).await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self))]
    async fn fetch_hint(
        &self,
        session_id: &str,
        item_index: usize,
        unit: SubUnit,
    ) -> Result<Hint, ServiceError> {
        debug!("Fetching hint");
        let request = self.hint_request(session_id, item_index, unit)?;
        let response = self.client.execute(request).await?;
        Self::read_json(response).await
    }

    /// Posts the tagged submission as the request body. The hints-used count
    /// travels inside it.
    #[instrument(skip(self, submission), fields(game = %submission.kind()))]
    async fn validate_attempt(
        &self,
        session_id: &str,
        item_index: usize,
        submission: &Submission,
    ) -> Result<ValidationResult, ServiceError> {
        debug!("Validating attempt");
        let request = self.attempt_request(session_id, item_index, submission)?;
        let response = self.client.execute(request).await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlankAnswer;

    fn service() -> HttpGameService {
        HttpGameService::new(&ServiceConfig::default()).expect("Default config is valid")
    }

    #[test]
    fn test_item_route() {
        let request = service().item_request("s-1", 2).expect("Request builds");
        assert_eq!(
            request.url().as_str(),
            "http://127.0.0.1:8080/api/sessions/s-1/items/2"
        );
    }

    #[test]
    fn test_session_id_is_one_escaped_segment() {
        let request = service().item_request("a/b?c#d", 0).expect("Request builds");
        assert_eq!(request.url().path_segments().map(|s| s.count()), Some(5));
        assert_eq!(request.url().query(), None);
        assert_eq!(request.url().fragment(), None);
        assert!(request.url().path().contains("a%2Fb%3Fc%23d"));
    }

    #[test]
    fn test_hint_sub_unit_goes_in_query() {
        let service = service();
        let request = service
            .hint_request("s-1", 0, SubUnit::Blank(3))
            .expect("Request builds");
        assert_eq!(request.url().path(), "/api/sessions/s-1/items/0/hint");
        assert_eq!(request.url().query(), Some("sub_unit=3"));

        let request = service
            .hint_request("s-1", 0, SubUnit::Item)
            .expect("Request builds");
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn test_attempt_body_carries_hints_once() {
        let submission = Submission::CompletePhrase {
            answers: vec![BlankAnswer::new(0, "sol".to_string())],
            hints_used: 2,
        };
        let request = service()
            .attempt_request("s-1", 1, &submission)
            .expect("Request builds");
        assert_eq!(request.url().path(), "/api/sessions/s-1/items/1/attempts");

        let bytes = request
            .body()
            .and_then(|b| b.as_bytes())
            .expect("JSON body is buffered");
        let body: serde_json::Value = serde_json::from_slice(bytes).expect("Body is JSON");
        assert_eq!(body["game"], "complete_phrase");
        assert_eq!(body["hints_used"], 2);
        assert_eq!(bytes.windows(10).filter(|w| *w == b"hints_used").count(), 1);
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let config: ServiceConfig =
            toml::from_str("base_url = \"http://juegos.local/edu/\"").expect("Valid config");
        let service = HttpGameService::new(&config).expect("Valid base URL");
        let request = service.item_request("s", 0).expect("Request builds");
        assert_eq!(request.url().path(), "/edu/api/sessions/s/items/0");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config: ServiceConfig =
            toml::from_str("base_url = \"not a url\"").expect("Valid config");
        assert!(HttpGameService::new(&config).is_err());
    }
}
