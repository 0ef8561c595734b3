//! Application constants for the customer loader
//!
//! This module contains the extract layout, destination naming rules,
//! and default values used throughout the loader.

// =============================================================================
// Extract Layout
// =============================================================================

/// Field separator used by the customer extract
pub const FIELD_DELIMITER: u8 = b'|';

/// Number of positional fields on every data line
pub const EXPECTED_FIELD_COUNT: usize = 11;

/// Positional field names, in extract order
pub const EXTRACT_FIELDS: [&str; EXPECTED_FIELD_COUNT] = [
    "record_type",
    "customer_name",
    "customer_id",
    "open_date",
    "last_consulted_date",
    "vaccination_id",
    "dr_name",
    "state",
    "country",
    "dob",
    "is_active",
];

/// Record type tag for detail rows
pub const DETAIL_RECORD_TYPE: &str = "D";

/// Fields that must be present on a detail record, checked in this order
pub const MANDATORY_FIELDS: &[&str] = &["customer_name", "customer_id", "open_date"];

// =============================================================================
// Dates
// =============================================================================

/// chrono format for extract dates (DDMMYYYY)
pub const EXTRACT_DATE_FORMAT: &str = "%d%m%Y";

/// Exact shape an extract date must have before calendar validation
pub const EXTRACT_DATE_PATTERN: &str = r"^[0-9]{8}$";

/// Format accepted for an explicit reference date (CLI, env, config)
pub const REFERENCE_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Destination Tables
// =============================================================================

/// Prefix for per-country destination tables
pub const TABLE_PREFIX: &str = "Table_";

/// Build the destination table name for a country code
pub fn table_name_for(country_code: &str) -> String {
    format!("{}{}", TABLE_PREFIX, country_code)
}

// =============================================================================
// Configuration Defaults
// =============================================================================

/// Application name used for the config directory
pub const APP_NAME: &str = "customer-loader";

/// Config file name within the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default SQLite database file
pub const DEFAULT_DATABASE_URL: &str = "customers.db";

/// URL scheme accepted in front of a SQLite path
pub const SQLITE_URL_SCHEME: &str = "sqlite://";

/// Default SQLite busy timeout in milliseconds
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Environment variable overrides
pub mod env {
    pub const DATABASE_URL: &str = "CUSTOMER_LOADER_DATABASE_URL";
    pub const MALFORMED_LINES: &str = "CUSTOMER_LOADER_MALFORMED_LINES";
    pub const REFERENCE_DATE: &str = "CUSTOMER_LOADER_REFERENCE_DATE";
}
