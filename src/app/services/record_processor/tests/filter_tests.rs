//! Tests for detail selection and mandatory field validation

use super::*;
use crate::app::services::record_processor::ProcessingStats;
use crate::app::services::record_processor::filter::{
    FilterOutcome, accept_record, classify_record, first_missing_mandatory_field,
    is_detail_record,
};

#[test]
fn test_detail_record_is_accepted() {
    let record = detail_record(2, "1001", "US");
    assert!(is_detail_record(&record));
    assert_eq!(classify_record(&record), FilterOutcome::Accepted);
}

#[test]
fn test_non_detail_types_are_dropped_regardless_of_content() {
    for record_type in ["H", "T", "d", "", "DD", " D"] {
        let record = record_with_type(2, record_type);
        assert_eq!(
            classify_record(&record),
            FilterOutcome::NotDetail,
            "record type {:?} should be dropped",
            record_type
        );
    }
}

#[test]
fn test_empty_customer_id_is_dropped() {
    let record = RawRecord {
        customer_id: String::new(),
        ..detail_record(2, "1001", "US")
    };
    assert_eq!(
        classify_record(&record),
        FilterOutcome::MissingField("customer_id")
    );
}

#[test]
fn test_whitespace_only_field_counts_as_missing() {
    let record = RawRecord {
        open_date: "   ".to_string(),
        ..detail_record(2, "1001", "US")
    };
    assert_eq!(first_missing_mandatory_field(&record), Some("open_date"));
}

#[test]
fn test_first_missing_field_is_reported() {
    let record = RawRecord {
        customer_name: String::new(),
        customer_id: String::new(),
        open_date: String::new(),
        ..detail_record(2, "1001", "US")
    };
    assert_eq!(first_missing_mandatory_field(&record), Some("customer_name"));
}

#[test]
fn test_optional_fields_may_be_empty() {
    let record = RawRecord {
        last_consulted_date: String::new(),
        vaccination_id: String::new(),
        dr_name: String::new(),
        dob: String::new(),
        ..detail_record(2, "1001", "US")
    };
    assert_eq!(classify_record(&record), FilterOutcome::Accepted);
}

#[test]
fn test_accept_record_updates_stats() {
    let mut stats = ProcessingStats::new();

    assert!(accept_record(&detail_record(2, "1", "US"), &mut stats));
    assert!(!accept_record(&record_with_type(3, "H"), &mut stats));
    assert!(!accept_record(
        &RawRecord {
            customer_id: String::new(),
            ..detail_record(4, "2", "US")
        },
        &mut stats
    ));

    assert_eq!(stats.non_detail_dropped, 1);
    assert_eq!(stats.validation_dropped(), 1);
    assert_eq!(stats.missing_field_dropped.get("customer_id"), Some(&1));
}
