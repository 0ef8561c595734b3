//! Country table storage for enriched customer records
//!
//! This module owns everything between a routed country partition and the
//! relational engine: the fixed destination schema, on-demand table creation,
//! and append-only row writes.
//!
//! ## Architecture
//!
//! - [`schema`] - Destination table definition, DDL and row coercion
//! - [`provisioner`] - `ensure_table`: create `Table_<country>` if absent
//! - [`persister`] - `append`: coerce and insert a partition's records
//! - [`sqlite`] - SQLite implementation of the store traits
//! - [`memory`] - In-process implementation used for dry runs and tests
//!
//! ## Connections
//!
//! A [`Connector`] is passed explicitly to whoever needs storage. Each call to
//! [`Connector::connect`] yields a fresh [`TableStore`] handle; callers keep
//! it for one country partition and drop it afterwards, which releases the
//! underlying connection even when an operation fails.

pub mod memory;
pub mod persister;
pub mod provisioner;
pub mod schema;
pub mod sqlite;

#[cfg(test)]
pub mod tests;

use crate::Result;

// Re-export main types for easy access
pub use memory::{MemoryConnector, MemoryStore};
pub use persister::append;
pub use provisioner::ensure_table;
pub use schema::{CUSTOMER_TABLE, Column, ColumnType, SqlValue, TableSchema};
pub use sqlite::{SqliteConnector, SqliteStore};

/// One open connection to the backing store
pub trait TableStore {
    /// Whether a table with this name exists
    fn table_exists(&mut self, table_name: &str) -> Result<bool>;

    /// Create a table with the given schema; fails if it already exists
    fn create_table(&mut self, table_name: &str, schema: &TableSchema) -> Result<()>;

    /// Append rows in schema column order; all rows are written or none are
    fn insert_rows(
        &mut self,
        table_name: &str,
        schema: &TableSchema,
        rows: &[Vec<SqlValue>],
    ) -> Result<usize>;
}

/// Source of store connections
pub trait Connector {
    type Store: TableStore;

    /// Open a new connection
    fn connect(&self) -> Result<Self::Store>;

    /// Human-readable description of the destination, for reports
    fn describe(&self) -> String;
}
