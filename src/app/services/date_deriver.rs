//! Date derivations for customer records
//!
//! Converts extract dates (DDMMYYYY) into the derived numeric facts stored
//! alongside each customer: age in whole years and days since the last
//! consultation. Parsing is strict and never logs; the `compute_*` functions
//! decide how a parse failure is reported.

use crate::constants::{EXTRACT_DATE_FORMAT, EXTRACT_DATE_PATTERN};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};

static EXTRACT_DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(EXTRACT_DATE_PATTERN).expect("extract date pattern is a valid regex")
});

/// Why an extract date could not be parsed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DateParseError {
    #[error("date is empty")]
    Empty,

    #[error("'{text}' is not 8 digits (expected DDMMYYYY)")]
    InvalidShape { text: String },

    #[error("'{text}' is not a valid calendar date: {source}")]
    InvalidCalendarDate {
        text: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parse a DDMMYYYY extract date
///
/// Only exactly eight ASCII digits forming a real calendar date are accepted.
/// Surrounding whitespace, separators and two-digit years are all failures.
pub fn parse_extract_date(text: &str) -> Result<NaiveDate, DateParseError> {
    if text.is_empty() {
        return Err(DateParseError::Empty);
    }

    if !EXTRACT_DATE_SHAPE.is_match(text) {
        return Err(DateParseError::InvalidShape {
            text: text.to_string(),
        });
    }

    NaiveDate::parse_from_str(text, EXTRACT_DATE_FORMAT).map_err(|source| {
        DateParseError::InvalidCalendarDate {
            text: text.to_string(),
            source,
        }
    })
}

/// Whole years from `dob` to `reference_date`
///
/// One less than the calendar-year difference when the birthday has not
/// been reached yet in the reference year.
pub fn age_on(dob: NaiveDate, reference_date: NaiveDate) -> i32 {
    let birthday_pending =
        (reference_date.month(), reference_date.day()) < (dob.month(), dob.day());
    reference_date.year() - dob.year() - i32::from(birthday_pending)
}

/// Signed day count `reference_date - date`
pub fn days_between(date: NaiveDate, reference_date: NaiveDate) -> i64 {
    (reference_date - date).num_days()
}

/// Age in years for a textual date of birth, `None` if it does not parse
pub fn compute_age(dob_text: &str, reference_date: NaiveDate) -> Option<i32> {
    match parse_extract_date(dob_text) {
        Ok(dob) => Some(age_on(dob, reference_date)),
        Err(e) => {
            report_parse_failure("DOB", &e);
            None
        }
    }
}

/// Days elapsed since a textual date, `None` if it does not parse
///
/// Future dates give a negative count; the value is not clamped.
pub fn compute_days_since(date_text: &str, reference_date: NaiveDate) -> Option<i64> {
    match parse_extract_date(date_text) {
        Ok(date) => Some(days_between(date, reference_date)),
        Err(e) => {
            report_parse_failure("Last Consulted Date", &e);
            None
        }
    }
}

fn report_parse_failure(label: &str, error: &DateParseError) {
    // Empty optional dates are routine in the extract
    if *error == DateParseError::Empty {
        debug!("No {} to parse", label);
    } else {
        warn!("Error parsing {}: {}", label, error);
    }
}
