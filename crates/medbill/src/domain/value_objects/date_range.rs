//! DateRange - Optional inclusive calendar window

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// ISO 8601 calendar date format used on every external surface
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive date window; either bound may be open.
///
/// An inverted window (`start > end`) is representable and simply contains
/// no dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "start_date")]
    pub start: Option<NaiveDate>,
    #[serde(rename = "end_date")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Window with neither bound
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Parse optional `YYYY-MM-DD` bounds. Empty strings count as absent.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, DomainError> {
        Ok(Self {
            start: parse_optional_date("start_date", start)?,
            end: parse_optional_date("end_date", end)?,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }
}

/// Length of a zero-padded `YYYY-MM-DD` date
const ISO_DATE_LEN: usize = 10;

/// Parse an optional ISO date query value. Month and day must be zero-padded.
pub fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    let malformed = |raw: &str| {
        DomainError::validation(format!("{} must be a YYYY-MM-DD date, got '{}'", field, raw))
    };
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) if raw.len() != ISO_DATE_LEN => Err(malformed(raw)),
        Some(raw) => NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT)
            .map(Some)
            .map_err(|_| malformed(raw)),
    }
}
