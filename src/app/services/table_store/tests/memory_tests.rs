//! Tests for the in-process store

use crate::Error;
use crate::app::services::table_store::{
    CUSTOMER_TABLE, Connector, MemoryConnector, SqlValue, TableStore,
};

#[test]
fn test_duplicate_create_fails() {
    let connector = MemoryConnector::new();
    let mut store = connector.connect().unwrap();

    store.create_table("Table_US", &CUSTOMER_TABLE).unwrap();
    let result = store.create_table("Table_US", &CUSTOMER_TABLE);
    assert!(matches!(result, Err(Error::Storage { .. })));
}

#[test]
fn test_row_width_is_checked() {
    let connector = MemoryConnector::new();
    let mut store = connector.connect().unwrap();
    store.create_table("Table_US", &CUSTOMER_TABLE).unwrap();

    let result = store.insert_rows("Table_US", &CUSTOMER_TABLE, &[vec![SqlValue::Null]]);
    assert!(result.is_err());
    assert_eq!(connector.row_count("Table_US"), 0);
}

#[test]
fn test_unknown_table_has_no_rows() {
    let connector = MemoryConnector::new();
    assert_eq!(connector.row_count("Table_XX"), 0);
    assert!(connector.rows("Table_XX").is_none());
    assert!(connector.describe().contains("in-memory"));
}

#[test]
fn test_table_names_ignore_ascii_case() {
    let connector = MemoryConnector::new();
    let mut store = connector.connect().unwrap();
    store.create_table("Table_us", &CUSTOMER_TABLE).unwrap();

    assert!(store.table_exists("Table_US").unwrap());
    assert!(matches!(
        store.create_table("Table_US", &CUSTOMER_TABLE),
        Err(Error::Storage { .. })
    ));

    let row = vec![SqlValue::Null; CUSTOMER_TABLE.columns.len()];
    store.insert_rows("TABLE_US", &CUSTOMER_TABLE, &[row]).unwrap();

    assert_eq!(connector.table_names(), vec!["Table_us".to_string()]);
    assert_eq!(connector.row_count("Table_US"), 1);
}
