use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::protocol::{
    AddParticipantRequest, FormDetails, ADD_PARTICIPANT_PATH, REMOVE_PARTICIPANT_PATH,
};
use tracing::{info, warn};
use url::Url;

pub mod config;
pub mod controller;
pub mod draft;
pub mod error;
pub mod validation;

pub use controller::{FormController, FormPhase, SubmissionResult, SUCCESS_MESSAGE};
pub use draft::{parse_cutoff, DraftField, FieldChange, FieldInput, SubmissionDraft};
pub use error::ClientError;
pub use validation::validate;

/// What the matching service said about an accepted request.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The service answered with a body other than `null`.
    Confirmed(Value),
    /// The service answered 2xx with a JSON `null` body.
    Unconfirmed,
}

impl SubmitOutcome {
    pub fn from_body(body: &str) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return SubmitOutcome::Confirmed(Value::String(String::new()));
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Null) => SubmitOutcome::Unconfirmed,
            Ok(value) => SubmitOutcome::Confirmed(value),
            Err(_) => SubmitOutcome::Confirmed(Value::String(trimmed.to_string())),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, SubmitOutcome::Confirmed(_))
    }
}

#[async_trait]
pub trait MatchmakingApi: Send + Sync {
    async fn add_participant(&self, details: &FormDetails) -> Result<SubmitOutcome, ClientError>;
    /// Takes the signed-in participant out of the matching queue.
    async fn remove_participant(&self) -> Result<String, ClientError>;
}

pub struct MatchmakingClient {
    http: Client,
    base_url: Url,
}

impl MatchmakingClient {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        Self::with_http_client(server_url, Client::new())
    }

    pub fn with_timeout(server_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_http_client(server_url, builder.build()?)
    }

    pub fn with_http_client(server_url: &str, http: Client) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            base_url: normalize_base_url(server_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|source| ClientError::InvalidServerUrl {
                url: format!("{}{path}", self.base_url),
                source,
            })
    }

    async fn post_for_text(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<String, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(path, %status, "matching service rejected request");
            return Err(ClientError::Status { status, body });
        }
        Ok(body)
    }
}

#[async_trait]
impl MatchmakingApi for MatchmakingClient {
    async fn add_participant(&self, details: &FormDetails) -> Result<SubmitOutcome, ClientError> {
        let url = self.endpoint(ADD_PARTICIPANT_PATH)?;
        info!(
            %url,
            duration = details.duration.minutes(),
            match_preference = %details.match_preference,
            "submitting participant"
        );
        let request = self.http.post(url).json(&AddParticipantRequest {
            form_details: details.clone(),
        });
        let body = self.post_for_text(request, ADD_PARTICIPANT_PATH).await?;
        let outcome = SubmitOutcome::from_body(&body);
        info!(confirmed = outcome.is_confirmed(), "participant submitted");
        Ok(outcome)
    }

    async fn remove_participant(&self) -> Result<String, ClientError> {
        let url = self.endpoint(REMOVE_PARTICIPANT_PATH)?;
        info!(%url, "leaving matching queue");
        let body = self
            .post_for_text(self.http.post(url), REMOVE_PARTICIPANT_PATH)
            .await?;
        Ok(body.trim().to_string())
    }
}

/// Parses `server_url` and makes sure relative joins keep its full path.
fn normalize_base_url(server_url: &str) -> Result<Url, ClientError> {
    let trimmed = server_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).map_err(|source| ClientError::InvalidServerUrl {
        url: server_url.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
