//! Customer Loader Library
//!
//! A Rust library for loading periodic pipe-delimited customer extracts into
//! country-partitioned relational tables.
//!
//! This library provides tools for:
//! - Parsing the extract into positional records with an explicit malformed-line policy
//! - Selecting detail records and enforcing mandatory fields
//! - Deriving age and days-since-last-consultation from textual dates
//! - Routing records into per-country partitions
//! - Provisioning `Table_<country>` tables on demand and appending rows to them

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod date_deriver;
        pub mod extract_parser;
        pub mod pipeline;
        pub mod record_processor;
        pub mod table_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{EnrichedRecord, RawRecord};
pub use config::Config;

/// Result type alias for the customer loader
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for customer extract loading
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// CSV reader failure (encoding, quoting, underlying read)
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Data line with the wrong number of fields
    #[error("Malformed line {line}: expected {expected} fields, found {found}")]
    MalformedLine {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Backing store rejected an operation
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    /// A value could not be coerced into its destination column
    #[error("Type coercion failed for {table}.{column} = '{value}': {reason}")]
    TypeCoercion {
        table: String,
        column: String,
        value: String,
        reason: String,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a malformed line error
    pub fn malformed_line(line: u64, expected: usize, found: usize) -> Self {
        Self::MalformedLine {
            line,
            expected,
            found,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a storage error without an underlying driver error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error wrapping a SQLite failure
    pub fn sqlite(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a type coercion error
    pub fn type_coercion(
        table: impl Into<String>,
        column: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::TypeCoercion {
            table: table.into(),
            column: column.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from the backing store and must abort the run
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::TypeCoercion { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::Storage {
            message: "SQLite operation failed".to_string(),
            source: Some(error),
        }
    }
}
