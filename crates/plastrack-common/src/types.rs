//! Common type definitions for domain modeling.

use crate::error::{Result, TrackerError};
use crate::utils::parse_record_date;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column headers of the persisted record store, in order.
pub const RECORD_HEADERS: [&str; 3] = ["Community", "Date", "Plastic_Used_kg"];

/// One plastic usage measurement for a community.
///
/// The date is kept as submitted. It is only coerced to a calendar date
/// by operations that need it, see [`UsageRecord::parsed_date`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Community the measurement belongs to.
    #[serde(rename = "Community")]
    pub community: String,
    /// Measurement date as textual calendar date.
    #[serde(rename = "Date")]
    pub date: String,
    /// Plastic used, in kilograms.
    #[serde(rename = "Plastic_Used_kg")]
    pub plastic_used_kg: f64,
}

impl UsageRecord {
    /// Creates a new usage record.
    pub fn new(community: impl Into<String>, date: impl Into<String>, plastic_used_kg: f64) -> Self {
        Self {
            community: community.into(),
            date: date.into(),
            plastic_used_kg,
        }
    }

    /// Coerces the record date to a calendar date.
    pub fn parsed_date(&self) -> Result<NaiveDate> {
        parse_record_date(&self.date)
    }

    /// Year and month of the record date.
    pub fn year_month(&self) -> Result<YearMonth> {
        self.parsed_date().map(YearMonth::from_date)
    }
}

/// The full, insertion-ordered collection of records in the store.
pub type RecordSet = Vec<UsageRecord>;

/// A calendar month, used as the monthly aggregation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Month of year, 1-12.
    pub month: u32,
}

impl YearMonth {
    /// Creates a year-month key, rejecting months outside 1-12.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(TrackerError::invalid_date(format!("{year:04}-{month:02}")))
        }
    }

    /// Truncates a date to its year and month.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_truncates_day() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let key = YearMonth::from_date(date);
        assert_eq!(key, YearMonth { year: 2024, month: 2 });
        assert_eq!(key.to_string(), "2024-02");
    }

    #[test]
    fn test_year_month_ordering_is_chronological() {
        let dec = YearMonth::new(2023, 12).unwrap();
        let jan = YearMonth::new(2024, 1).unwrap();
        let feb = YearMonth::new(2024, 2).unwrap();
        assert!(dec < jan);
        assert!(jan < feb);
    }

    #[test]
    fn test_year_month_rejects_bad_month() {
        assert!(YearMonth::new(2024, 0).is_err());
        assert!(YearMonth::new(2024, 13).is_err());
    }

    #[test]
    fn test_record_year_month() {
        let record = UsageRecord::new("Riverside", "2024-01-15", 12.5);
        assert_eq!(record.year_month().unwrap().to_string(), "2024-01");

        let bad = UsageRecord::new("Riverside", "not-a-date", 1.0);
        assert!(matches!(bad.year_month(), Err(TrackerError::InvalidDate { .. })));
    }
}
