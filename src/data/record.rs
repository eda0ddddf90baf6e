//! Survey Record Module
//! Typed row produced by the loader, plus the coercion rules applied to raw CSV fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Timestamp layouts accepted for `START_DATE`. Slash dates are month first.
const DATETIME_FORMATS: [&str; 11] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f UTC",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

/// Layouts carrying a numeric UTC offset besides RFC 3339.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f %z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// One call-log record whose timestamp parsed successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyRecord {
    pub timestamp: NaiveDateTime,
    pub date: NaiveDate,
    pub status: String,
    pub interaction_flag: bool,
    pub support_reason_1: String,
    pub preference_1: String,
    pub support_reason_2: String,
    pub preference_2: String,
    pub approval_rating: String,
}

impl SurveyRecord {
    /// Build a record from raw text fields.
    ///
    /// Returns `None` when the timestamp is missing or malformed; such rows
    /// never enter the dataset.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        start_date: Option<&str>,
        interaction_user: Option<&str>,
        status: Option<&str>,
        support_reason_1: Option<&str>,
        preference_1: Option<&str>,
        support_reason_2: Option<&str>,
        preference_2: Option<&str>,
        approval_rating: Option<&str>,
    ) -> Option<Self> {
        let timestamp = parse_timestamp(start_date?)?;
        Some(Self {
            timestamp,
            date: timestamp.date(),
            status: text(status),
            interaction_flag: parse_flag(interaction_user),
            support_reason_1: text(support_reason_1),
            preference_1: text(preference_1),
            support_reason_2: text(support_reason_2),
            preference_2: text(preference_2),
            approval_rating: text(approval_rating),
        })
    }
}

/// Which of the two party questions of the survey to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PartyQuestion {
    First,
    Second,
}

impl PartyQuestion {
    pub fn preference<'a>(&self, record: &'a SurveyRecord) -> &'a str {
        match self {
            PartyQuestion::First => &record.preference_1,
            PartyQuestion::Second => &record.preference_2,
        }
    }

    pub fn support_reason<'a>(&self, record: &'a SurveyRecord) -> &'a str {
        match self {
            PartyQuestion::First => &record.support_reason_1,
            PartyQuestion::Second => &record.support_reason_2,
        }
    }

    /// Source column holding the preferred party.
    pub fn preference_column(&self) -> &'static str {
        match self {
            PartyQuestion::First => "partido1_preferencia",
            PartyQuestion::Second => "partido2_preferencia",
        }
    }

    /// Source column holding the support reason.
    pub fn reason_column(&self) -> &'static str {
        match self {
            PartyQuestion::First => "partido1_apoyo",
            PartyQuestion::Second => "partido2_apoyo",
        }
    }
}

/// Parse a `START_DATE` value. Offset timestamps keep their wall-clock time.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.naive_local());
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Case-insensitive match against `"true"`; everything else is `false`.
pub fn parse_flag(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

fn text(raw: Option<&str>) -> String {
    raw.map(str::to_string).unwrap_or_default()
}
