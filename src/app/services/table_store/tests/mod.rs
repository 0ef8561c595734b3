//! Test utilities for table store testing

use crate::app::models::EnrichedRecord;
use crate::app::services::table_store::SqliteConnector;
use tempfile::TempDir;

// Test modules
mod memory_tests;
mod persister_tests;
mod provisioner_tests;

/// Enriched record with valid values for every column
pub fn sample_record(customer_id: &str, country: &str) -> EnrichedRecord {
    EnrichedRecord {
        line_number: 2,
        customer_name: "Alex".to_string(),
        customer_id: customer_id.to_string(),
        open_date: "12102010".to_string(),
        last_consulted_date: "13012012".to_string(),
        vaccination_id: "MVD".to_string(),
        dr_name: "Paul".to_string(),
        state: "SA".to_string(),
        country: country.to_string(),
        dob: "06031987".to_string(),
        is_active: "A".to_string(),
        age: Some(37),
        days_since_last_consulted: Some(4440),
    }
}

/// SQLite connector on a fresh database file inside a temp directory
///
/// The directory must outlive the connector.
pub fn temp_sqlite() -> (TempDir, SqliteConnector) {
    let dir = TempDir::new().unwrap();
    let connector = SqliteConnector::new(dir.path().join("customers.db"));
    (dir, connector)
}
