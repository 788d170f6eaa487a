use reqwest::StatusCode;
use shared::error::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid server url {url:?}: {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("request to matching service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("matching service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("this form has already been submitted")]
    AlreadySubmitted,
    #[error("choose a role and product area before setting a match preference")]
    MatchPreferenceLocked,
}

impl ClientError {
    /// Validation failures are fixed by editing the form; everything else is not.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}
