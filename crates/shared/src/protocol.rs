use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{MatchPreference, ProductArea, Role, TalkDuration};

pub const ADD_PARTICIPANT_PATH: &str = "api/v1/add-participant";
pub const REMOVE_PARTICIPANT_PATH: &str = "api/v1/remove-participant";

/// Form fields exactly as the matching service receives them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDetails {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub time_available_until: DateTime<Utc>,
    pub duration: TalkDuration,
    #[serde(with = "label_or_empty")]
    pub role: Option<Role>,
    #[serde(with = "label_or_empty")]
    pub product_area: Option<ProductArea>,
    pub match_preference: MatchPreference,
    pub save_preference: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddParticipantRequest {
    pub form_details: FormDetails,
}

/// Unset dropdowns travel as `""`, selected ones as their label.
mod label_or_empty {
    use std::{fmt::Display, str::FromStr};

    use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(D::Error::custom)
    }
}
