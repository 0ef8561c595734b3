//! Tests for the main RecordProcessor

use super::*;
use crate::Error;
use crate::app::services::record_processor::RecordProcessor;

fn ok_all(records: Vec<RawRecord>) -> Vec<crate::Result<RawRecord>> {
    records.into_iter().map(Ok).collect()
}

#[test]
fn test_process_full_pipeline() {
    let processor = RecordProcessor::new(reference_date());
    let records = ok_all(vec![
        record_with_type(2, "H"),
        detail_record(3, "1", "US"),
        detail_record(4, "2", "IN"),
        RawRecord {
            customer_name: String::new(),
            ..detail_record(5, "3", "US")
        },
        detail_record(6, "4", "US"),
        record_with_type(7, "T"),
    ]);

    let result = processor.process(records).unwrap();

    assert_eq!(result.country_codes(), vec!["US", "IN"]);
    assert_eq!(result.record_count(), 3);
    assert_eq!(result.partitions[0].records[0].age, Some(33));

    let stats = &result.stats;
    assert_eq!(stats.total_input, 6);
    assert_eq!(stats.non_detail_dropped, 2);
    assert_eq!(stats.validation_dropped(), 1);
    assert_eq!(stats.validated, 3);
    assert_eq!(stats.final_output, 3);
}

#[test]
fn test_process_uses_fixed_reference_date() {
    let processor = RecordProcessor::new(reference_date());
    assert_eq!(processor.reference_date(), reference_date());

    let result = processor
        .process(ok_all(vec![
            detail_record(2, "1", "US"),
            detail_record(3, "2", "US"),
        ]))
        .unwrap();

    let ages: Vec<Option<i32>> = result.partitions[0].records.iter().map(|r| r.age).collect();
    assert_eq!(ages, vec![Some(33), Some(33)]);
}

#[test]
fn test_process_empty_input() {
    let processor = RecordProcessor::new(reference_date());
    let result = processor.process(Vec::new()).unwrap();

    assert_eq!(result.record_count(), 0);
    assert_eq!(result.stats.total_input, 0);
    assert_eq!(result.stats.success_rate(), 100.0);
}

#[test]
fn test_process_stops_at_first_error() {
    let processor = RecordProcessor::new(reference_date());
    let records = vec![
        Ok(detail_record(2, "1", "US")),
        Err(Error::malformed_line(3, 11, 2)),
        Ok(detail_record(4, "2", "US")),
    ];

    let result = processor.process(records);
    assert!(matches!(result, Err(Error::MalformedLine { line: 3, .. })));
}
