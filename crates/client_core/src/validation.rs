use chrono::{DateTime, Utc};
use shared::{error::ValidationError, protocol::FormDetails};

use crate::draft::SubmissionDraft;

/// Checks that the requested talk fits before the availability cutoff.
///
/// The window is exclusive: a talk ending exactly at the cutoff is refused.
pub fn validate(draft: &SubmissionDraft, now: DateTime<Utc>) -> Result<FormDetails, ValidationError> {
    let Some(time_available_until) = draft.time_available_until else {
        return Err(ValidationError::InvalidDate);
    };

    let earliest_end = now
        .timestamp_millis()
        .saturating_add(draft.duration.as_millis());
    if earliest_end >= time_available_until.timestamp_millis() {
        return Err(ValidationError::WindowTooSmall);
    }

    Ok(FormDetails {
        time_available_until,
        duration: draft.duration,
        role: draft.role,
        product_area: draft.product_area,
        match_preference: draft.match_preference,
        save_preference: draft.save_preference,
    })
}
