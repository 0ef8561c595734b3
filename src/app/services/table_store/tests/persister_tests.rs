//! Tests for append-only persistence

use super::*;
use crate::Error;
use crate::app::services::table_store::{
    Connector, MemoryConnector, SqlValue, append, ensure_table,
};
use crate::config::InvalidDatePolicy;

#[test]
fn test_append_preserves_order_and_duplicates() {
    let connector = MemoryConnector::new();
    let mut store = connector.connect().unwrap();
    ensure_table(&mut store, "US").unwrap();

    let records = vec![
        sample_record("1", "US"),
        sample_record("2", "US"),
        sample_record("1", "US"),
    ];
    let written = append(&mut store, "US", &records, InvalidDatePolicy::Reject).unwrap();
    assert_eq!(written, 3);

    // A second run appends again rather than merging
    append(&mut store, "US", &records[..1], InvalidDatePolicy::Reject).unwrap();

    let rows = connector.rows("Table_US").unwrap();
    let ids: Vec<&SqlValue> = rows.iter().map(|row| &row[1]).collect();
    assert_eq!(
        ids,
        vec![
            &SqlValue::Text("1".to_string()),
            &SqlValue::Text("2".to_string()),
            &SqlValue::Text("1".to_string()),
            &SqlValue::Text("1".to_string()),
        ]
    );
}

#[test]
fn test_append_empty_batch() {
    let connector = MemoryConnector::new();
    let mut store = connector.connect().unwrap();
    ensure_table(&mut store, "US").unwrap();

    assert_eq!(append(&mut store, "US", &[], InvalidDatePolicy::Reject).unwrap(), 0);
    assert_eq!(connector.row_count("Table_US"), 0);
}

#[test]
fn test_append_to_missing_table_is_a_storage_error() {
    let connector = MemoryConnector::new();
    let mut store = connector.connect().unwrap();

    let result = append(&mut store, "FR", &[sample_record("1", "FR")], InvalidDatePolicy::Reject);
    assert!(matches!(result, Err(Error::Storage { .. })));
}

#[test]
fn test_coercion_failure_writes_nothing() {
    let connector = MemoryConnector::new();
    let mut store = connector.connect().unwrap();
    ensure_table(&mut store, "US").unwrap();

    let bad = EnrichedRecord {
        is_active: "YES".to_string(),
        ..sample_record("2", "US")
    };
    let result = append(
        &mut store,
        "US",
        &[sample_record("1", "US"), bad],
        InvalidDatePolicy::Reject,
    );

    assert!(matches!(result, Err(Error::TypeCoercion { .. })));
    assert_eq!(connector.row_count("Table_US"), 0);
}
