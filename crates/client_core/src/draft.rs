//! The in-memory submission draft and the pure updates applied to it.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use shared::domain::{MatchPreference, ProductArea, Role, TalkDuration};

/// Form values that have not been submitted yet.
///
/// A draft is never edited in place: [`SubmissionDraft::apply`] derives the
/// next draft and leaves the previous one untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDraft {
    /// `None` when the user entered something that is not a valid instant.
    pub time_available_until: Option<DateTime<Utc>>,
    pub duration: TalkDuration,
    pub role: Option<Role>,
    pub product_area: Option<ProductArea>,
    pub match_preference: MatchPreference,
    pub save_preference: bool,
}

impl SubmissionDraft {
    /// Defaults used when the form is first shown.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            time_available_until: Some(now),
            duration: TalkDuration::default(),
            role: None,
            product_area: None,
            match_preference: MatchPreference::default(),
            save_preference: true,
        }
    }

    pub fn apply(&self, change: FieldChange) -> Self {
        let mut next = self.clone();
        match change {
            FieldChange::TimeAvailableUntil(value) => next.time_available_until = value,
            FieldChange::Duration(value) => next.duration = value,
            FieldChange::Role(value) => next.role = Some(value),
            FieldChange::ProductArea(value) => next.product_area = Some(value),
            FieldChange::MatchPreference(value) => next.match_preference = value,
            FieldChange::SavePreference(value) => next.save_preference = value,
        }
        next
    }

    /// Match preference only means something once both personal fields are known.
    pub fn personal_fields_complete(&self) -> bool {
        self.role.is_some() && self.product_area.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    TimeAvailableUntil,
    Duration,
    Role,
    ProductArea,
    MatchPreference,
    SavePreference,
}

/// A single value forwarded by one of the form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChange {
    TimeAvailableUntil(Option<DateTime<Utc>>),
    Duration(TalkDuration),
    Role(Role),
    ProductArea(ProductArea),
    MatchPreference(MatchPreference),
    SavePreference(bool),
}

impl FieldChange {
    pub fn field(&self) -> DraftField {
        match self {
            FieldChange::TimeAvailableUntil(_) => DraftField::TimeAvailableUntil,
            FieldChange::Duration(_) => DraftField::Duration,
            FieldChange::Role(_) => DraftField::Role,
            FieldChange::ProductArea(_) => DraftField::ProductArea,
            FieldChange::MatchPreference(_) => DraftField::MatchPreference,
            FieldChange::SavePreference(_) => DraftField::SavePreference,
        }
    }
}

/// Anything that accepts values from the form's controlled inputs.
pub trait FieldInput {
    fn on_field_change(&mut self, change: FieldChange);
}

/// Parses the "free until" input.
///
/// Accepts `HH:MM` (24h), `h:MM AM/PM` on the same calendar day as `today`,
/// or a full RFC 3339 timestamp. Anything else yields `None`, which
/// validation reports as an invalid date.
pub fn parse_cutoff<Tz: TimeZone>(raw: &str, today: &DateTime<Tz>) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    let time = ["%H:%M", "%I:%M %p", "%I:%M%p"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())?;
    let local = today.date_naive().and_time(time);
    today
        .timezone()
        .from_local_datetime(&local)
        .single()
        .map(|instant| instant.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).expect("timestamp")
    }

    #[test]
    fn new_draft_uses_form_defaults() {
        let draft = SubmissionDraft::new(at(5_000));
        assert_eq!(draft.time_available_until, Some(at(5_000)));
        assert_eq!(draft.duration, TalkDuration::Fifteen);
        assert_eq!(draft.role, None);
        assert_eq!(draft.product_area, None);
        assert_eq!(draft.match_preference, MatchPreference::NoPreference);
        assert!(draft.save_preference);
    }

    #[test]
    fn apply_returns_new_draft_and_keeps_previous() {
        let original = SubmissionDraft::new(at(0));
        let next = original.apply(FieldChange::Role(Role::Recruiter));

        assert_eq!(original.role, None);
        assert_eq!(next.role, Some(Role::Recruiter));
    }

    #[test]
    fn each_change_touches_only_its_field() {
        let base = SubmissionDraft::new(at(0));
        let changes = [
            FieldChange::TimeAvailableUntil(None),
            FieldChange::Duration(TalkDuration::Sixty),
            FieldChange::Role(Role::Director),
            FieldChange::ProductArea(ProductArea::Waze),
            FieldChange::MatchPreference(MatchPreference::Different),
            FieldChange::SavePreference(false),
        ];

        for change in changes {
            let next = base.apply(change);
            let differing = [
                (DraftField::TimeAvailableUntil, next.time_available_until != base.time_available_until),
                (DraftField::Duration, next.duration != base.duration),
                (DraftField::Role, next.role != base.role),
                (DraftField::ProductArea, next.product_area != base.product_area),
                (DraftField::MatchPreference, next.match_preference != base.match_preference),
                (DraftField::SavePreference, next.save_preference != base.save_preference),
            ];
            for (field, changed) in differing {
                assert_eq!(changed, field == change.field(), "{change:?} vs {field:?}");
            }
        }
    }

    #[test]
    fn personal_fields_require_role_and_product_area() {
        let draft = SubmissionDraft::new(at(0));
        assert!(!draft.personal_fields_complete());
        let draft = draft.apply(FieldChange::Role(Role::Intern));
        assert!(!draft.personal_fields_complete());
        let draft = draft.apply(FieldChange::ProductArea(ProductArea::Core));
        assert!(draft.personal_fields_complete());
    }

    #[test]
    fn parses_clock_times_on_the_same_day() {
        let today = DateTime::parse_from_rfc3339("2020-07-01T09:00:00+02:00").expect("today");

        assert_eq!(
            parse_cutoff("17:30", &today),
            Some(
                DateTime::parse_from_rfc3339("2020-07-01T15:30:00Z")
                    .expect("expected")
                    .with_timezone(&Utc)
            )
        );
        assert_eq!(parse_cutoff("5:30 PM", &today), parse_cutoff("17:30", &today));
    }

    #[test]
    fn parses_rfc3339_and_rejects_garbage() {
        let today = Utc::now().with_timezone(&FixedOffset::east_opt(0).expect("offset"));

        assert_eq!(parse_cutoff("1970-01-01T00:00:01Z", &today), Some(at(1_000)));
        assert_eq!(parse_cutoff("tomorrow-ish", &today), None);
        assert_eq!(parse_cutoff("25:99", &today), None);
    }
}
