//! Data Processor Module
//! Date selection over the loaded records.

use super::record::SurveyRecord;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Selector value standing for "every date".
pub const ALL_DATES: &str = "todos";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProcessorError {
    #[error("Invalid date selector {0:?}: expected \"todos\" or YYYY-MM-DD")]
    InvalidDate(String),
}

/// Date dropdown value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFilter {
    #[default]
    All,
    Day(NaiveDate),
}

impl DateFilter {
    /// Human label used in the dropdown.
    pub fn label(&self) -> String {
        match self {
            DateFilter::All => "Todo el periodo".to_string(),
            DateFilter::Day(date) => date.to_string(),
        }
    }

    pub fn matches(&self, record: &SurveyRecord) -> bool {
        match self {
            DateFilter::All => true,
            DateFilter::Day(date) => record.date == *date,
        }
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFilter::All => f.write_str(ALL_DATES),
            DateFilter::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl FromStr for DateFilter {
    type Err = ProcessorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ALL_DATES) || s.eq_ignore_ascii_case("all") {
            return Ok(DateFilter::All);
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DateFilter::Day)
            .map_err(|_| ProcessorError::InvalidDate(s.to_string()))
    }
}

/// Handles record selection operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Records matching the selector, in their original order.
    pub fn filter_by_date(records: &[SurveyRecord], filter: &DateFilter) -> Vec<SurveyRecord> {
        records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    /// Distinct record dates, ascending.
    pub fn distinct_dates(records: &[SurveyRecord]) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        dates.sort();
        dates.dedup();
        dates
    }

    /// Dropdown options: "all" first, then every date present in the data.
    pub fn date_options(records: &[SurveyRecord]) -> Vec<DateFilter> {
        std::iter::once(DateFilter::All)
            .chain(
                Self::distinct_dates(records)
                    .into_iter()
                    .map(DateFilter::Day),
            )
            .collect()
    }
}
