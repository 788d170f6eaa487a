use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownOption;

/// Lowercases `label` and collapses every run of non-alphanumeric characters
/// into a single `-`, e.g. `"UI/UX Designer"` becomes `"ui-ux-designer"`.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

macro_rules! labeled_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn slug(self) -> String {
                slugify(self.label())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let wanted = slugify(raw);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.slug() == wanted)
                    .ok_or_else(|| UnknownOption::new($kind, raw))
            }
        }
    };
}

labeled_enum!(Role, "role", {
    SoftwareEngineer => "Software Engineer",
    ProductManager => "Product Manager",
    UiUxDesigner => "UI/UX Designer",
    Recruiter => "Recruiter",
    Intern => "Intern",
    Vp => "VP",
    Director => "Director",
    Ceo => "CEO",
});

labeled_enum!(ProductArea, "product area", {
    Ads => "Ads",
    Area120 => "Area 120",
    Cloud => "Cloud",
    Commerce => "Commerce",
    CommunityEfforts => "Community Efforts",
    Core => "Core",
    CorporateEngineering => "Corporate Engineering",
    DevicesAndServices => "Devices and Services",
    Geo => "Geo",
    GlobalAffairs => "Global Affairs",
    GlobalBusinessOperations => "Global Business & Operations",
    GlobalCommunications => "Global Communications & Public Affairs",
    GoogleAdvisors => "Google - advisors",
    GoogleFinance => "Google Finance",
    Health => "Health",
    Jigsaw => "Jigsaw",
    LearningEducation => "Learning & Education",
    Marketing => "Marketing",
    NextBillionUsers => "Next Billion Users",
    Payments => "Payments",
    PeopleOperations => "People Operations",
    PlatformsEcosystems => "Platforms & Ecosystems",
    Rews => "REWS (Real Estate & Workplace Services)",
    Research => "Research",
    Search => "Search",
    Waze => "Waze",
    Youtube => "Youtube",
});

/// Length of the requested conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TalkDuration {
    #[default]
    Fifteen,
    Thirty,
    FortyFive,
    Sixty,
}

impl TalkDuration {
    pub const ALL: &'static [TalkDuration] = &[
        TalkDuration::Fifteen,
        TalkDuration::Thirty,
        TalkDuration::FortyFive,
        TalkDuration::Sixty,
    ];

    pub fn minutes(self) -> u32 {
        match self {
            TalkDuration::Fifteen => 15,
            TalkDuration::Thirty => 30,
            TalkDuration::FortyFive => 45,
            TalkDuration::Sixty => 60,
        }
    }

    pub fn as_millis(self) -> i64 {
        i64::from(self.minutes()) * 60_000
    }

    pub fn label(self) -> String {
        format!("{} minutes", self.minutes())
    }
}

impl TryFrom<u32> for TalkDuration {
    type Error = UnknownOption;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|duration| duration.minutes() == minutes)
            .ok_or_else(|| UnknownOption::new("duration", minutes.to_string()))
    }
}

impl From<TalkDuration> for u32 {
    fn from(value: TalkDuration) -> Self {
        value.minutes()
    }
}

impl fmt::Display for TalkDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutes", self.minutes())
    }
}

impl FromStr for TalkDuration {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let digits = raw.trim().trim_end_matches("minutes").trim_end_matches('m');
        digits
            .trim()
            .parse::<u32>()
            .map_err(|_| UnknownOption::new("duration", raw))
            .and_then(TalkDuration::try_from)
    }
}

/// Whether the participant wants to be paired with someone like them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPreference {
    Similar,
    #[default]
    #[serde(rename = "none")]
    NoPreference,
    Different,
}

impl MatchPreference {
    pub const ALL: &'static [MatchPreference] = &[
        MatchPreference::Similar,
        MatchPreference::NoPreference,
        MatchPreference::Different,
    ];

    pub fn wire_value(self) -> &'static str {
        match self {
            MatchPreference::Similar => "similar",
            MatchPreference::NoPreference => "none",
            MatchPreference::Different => "different",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchPreference::Similar => "Similar Googler",
            MatchPreference::NoPreference => "No Preference",
            MatchPreference::Different => "Different Googler",
        }
    }
}

impl fmt::Display for MatchPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

impl FromStr for MatchPreference {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = slugify(raw);
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| {
                candidate.wire_value() == wanted || slugify(candidate.label()) == wanted
            })
            .ok_or_else(|| UnknownOption::new("match preference", raw))
    }
}
