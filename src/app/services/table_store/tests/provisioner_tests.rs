//! Tests for on-demand table creation

use super::*;
use crate::app::services::table_store::{Connector, MemoryConnector, ensure_table};

#[test]
fn test_ensure_table_is_idempotent() {
    let connector = MemoryConnector::new();

    let mut store = connector.connect().unwrap();
    assert!(ensure_table(&mut store, "US").unwrap());
    assert!(!ensure_table(&mut store, "US").unwrap());

    assert_eq!(connector.table_names(), vec!["Table_US".to_string()]);
}

#[test]
fn test_ensure_table_across_connections() {
    let connector = MemoryConnector::new();

    {
        let mut store = connector.connect().unwrap();
        assert!(ensure_table(&mut store, "IN").unwrap());
    }

    let mut store = connector.connect().unwrap();
    assert!(!ensure_table(&mut store, "IN").unwrap());
    assert!(ensure_table(&mut store, "AU").unwrap());
    assert_eq!(
        connector.table_names(),
        vec!["Table_AU".to_string(), "Table_IN".to_string()]
    );
}

#[test]
fn test_ensure_table_sqlite() {
    let (_dir, connector) = temp_sqlite();

    let mut store = connector.connect().unwrap();
    assert!(ensure_table(&mut store, "US").unwrap());
    drop(store);

    let mut store = connector.connect().unwrap();
    assert!(!ensure_table(&mut store, "US").unwrap());
    assert_eq!(store.table_names().unwrap(), vec!["Table_US".to_string()]);
}
