//! Test utilities for record processor testing
//!
//! Builders for raw and enriched records shared by the record processor
//! test modules.

use crate::app::models::{EnrichedRecord, RawRecord};
use chrono::NaiveDate;

mod filter_tests;
mod processor_tests;

/// Reference date used across processor tests
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

/// Create a valid detail record for the given id and country
pub fn detail_record(line: u64, customer_id: &str, country: &str) -> RawRecord {
    RawRecord {
        line_number: line,
        record_type: "D".to_string(),
        customer_name: format!("Customer {}", customer_id),
        customer_id: customer_id.to_string(),
        open_date: "20101012".to_string(),
        last_consulted_date: "01032024".to_string(),
        vaccination_id: "MVD".to_string(),
        dr_name: "Paul".to_string(),
        state: "SA".to_string(),
        country: country.to_string(),
        dob: "15031990".to_string(),
        is_active: "A".to_string(),
    }
}

/// Create a record with a non-detail record type
pub fn record_with_type(line: u64, record_type: &str) -> RawRecord {
    RawRecord {
        record_type: record_type.to_string(),
        ..detail_record(line, "999", "US")
    }
}

/// Create an enriched record for routing tests
pub fn enriched_record(line: u64, customer_id: &str, country: &str) -> EnrichedRecord {
    EnrichedRecord::from_raw(detail_record(line, customer_id, country), Some(33), Some(9))
}
