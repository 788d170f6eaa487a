//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{ClientError, SubmitOutcome};

pub enum UiEvent {
    Info(String),
    SubmissionFinished(Result<SubmitOutcome, ClientError>),
    LeftQueue(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submit,
    LeaveQueue,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Validation(_)
            | ClientError::MatchPreferenceLocked
            | ClientError::AlreadySubmitted => UiErrorCategory::Validation,
            ClientError::Transport(_) | ClientError::InvalidServerUrl { .. } => {
                UiErrorCategory::Transport
            }
            ClientError::Status { .. } => UiErrorCategory::Server,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("please select") {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("request to matching service failed")
            || message_lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("matching service returned") {
            UiErrorCategory::Server
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Banner text shown above the form.
    pub fn banner(&self) -> String {
        let prefix = match self.category {
            UiErrorCategory::Transport => "Matching service unreachable",
            UiErrorCategory::Server => "Matching service error",
            UiErrorCategory::Validation => "Check your answers",
            UiErrorCategory::Unknown => "Something went wrong",
        };
        format!("{prefix}: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use shared::error::ValidationError;

    use super::*;

    fn status(code: u16) -> ClientError {
        ClientError::Status {
            status: code.try_into().expect("status code"),
            body: "Invalid input(s).".to_string(),
        }
    }

    #[test]
    fn classifies_client_errors_by_variant() {
        let validation = UiError::from_client_error(
            UiErrorContext::Submit,
            &ClientError::Validation(ValidationError::WindowTooSmall),
        );
        assert_eq!(validation.category(), UiErrorCategory::Validation);
        assert_eq!(
            validation.message(),
            "Please select a larger time availability window."
        );

        let server = UiError::from_client_error(UiErrorContext::Submit, &status(500));
        assert_eq!(server.category(), UiErrorCategory::Server);
        assert!(server.banner().starts_with("Matching service error"));
    }

    #[test]
    fn classifies_backend_command_processor_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "Backend command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::General);
    }
}
