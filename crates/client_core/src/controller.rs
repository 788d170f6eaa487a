//! Form controller: owns the current draft and gates the single submission.

use chrono::{DateTime, Utc};
use shared::protocol::FormDetails;
use tracing::{debug, info, warn};

use crate::{
    draft::{FieldChange, FieldInput, SubmissionDraft},
    error::ClientError,
    validation::validate,
    MatchmakingApi, SubmitOutcome,
};

pub const SUCCESS_MESSAGE: &str = "Successful";

#[derive(Debug, Clone, PartialEq)]
pub enum FormPhase {
    Editing,
    Validating,
    Submitting,
    /// Terminal. The draft is not resubmitted or edited afterwards.
    Submitted(SubmissionResult),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Confirmed,
    Unconfirmed,
    Failed(String),
}

pub struct FormController {
    draft: SubmissionDraft,
    phase: FormPhase,
    last_message: Option<String>,
}

impl FormController {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::with_draft(SubmissionDraft::new(now))
    }

    pub fn with_draft(draft: SubmissionDraft) -> Self {
        Self {
            draft,
            phase: FormPhase::Editing,
            last_message: None,
        }
    }

    pub fn draft(&self) -> &SubmissionDraft {
        &self.draft
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// The latest user-facing notice: a validation error, a failure, or the confirmation.
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    pub fn match_preference_enabled(&self) -> bool {
        self.draft.personal_fields_complete()
    }

    pub fn is_editable(&self) -> bool {
        self.phase == FormPhase::Editing
    }

    pub fn try_change(&mut self, change: FieldChange) -> Result<(), ClientError> {
        if !self.is_editable() {
            return Err(ClientError::AlreadySubmitted);
        }
        if matches!(change, FieldChange::MatchPreference(_)) && !self.match_preference_enabled() {
            return Err(ClientError::MatchPreferenceLocked);
        }
        debug!(field = ?change.field(), "draft field changed");
        self.draft = self.draft.apply(change);
        Ok(())
    }

    /// Validates the draft and, on success, moves to `Submitting`.
    ///
    /// A validation failure returns the form to `Editing` so the user can fix it.
    pub fn begin_submit(&mut self, now: DateTime<Utc>) -> Result<FormDetails, ClientError> {
        if !self.is_editable() {
            warn!(phase = ?self.phase, "submission already attempted");
            return Err(ClientError::AlreadySubmitted);
        }

        self.phase = FormPhase::Validating;
        match validate(&self.draft, now) {
            Ok(details) => {
                self.phase = FormPhase::Submitting;
                self.last_message = None;
                Ok(details)
            }
            Err(err) => {
                info!(reason = %err, "draft rejected by validation");
                self.phase = FormPhase::Editing;
                self.last_message = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Returns to `Editing` when the validated request could not be handed off.
    pub fn abort_submit(&mut self) {
        if self.phase == FormPhase::Submitting {
            warn!("submission aborted before reaching the matching service");
            self.phase = FormPhase::Editing;
        }
    }

    pub fn finish_submit(&mut self, result: &Result<SubmitOutcome, ClientError>) {
        let submission = match result {
            Ok(SubmitOutcome::Confirmed(_)) => {
                self.last_message = Some(SUCCESS_MESSAGE.to_string());
                SubmissionResult::Confirmed
            }
            Ok(SubmitOutcome::Unconfirmed) => {
                self.last_message = None;
                SubmissionResult::Unconfirmed
            }
            Err(err) => {
                self.last_message = Some(err.to_string());
                SubmissionResult::Failed(err.to_string())
            }
        };
        info!(result = ?submission, "submission finished");
        self.phase = FormPhase::Submitted(submission);
    }

    /// Validates, sends the single request through `api` and records the result.
    pub async fn submit_with<A>(
        &mut self,
        api: &A,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, ClientError>
    where
        A: MatchmakingApi + ?Sized,
    {
        let details = self.begin_submit(now)?;
        let result = api.add_participant(&details).await;
        self.finish_submit(&result);
        result
    }
}

impl FieldInput for FormController {
    fn on_field_change(&mut self, change: FieldChange) {
        if let Err(err) = self.try_change(change) {
            warn!(field = ?change.field(), "ignored field change: {err}");
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
