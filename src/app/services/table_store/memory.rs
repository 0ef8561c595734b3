//! In-process table store
//!
//! Behaves like a minimal relational engine (duplicate creates and inserts
//! into missing tables fail, table names ignore ASCII case) without touching
//! disk. Every connection from one [`MemoryConnector`] sees the same tables.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::schema::{SqlValue, TableSchema};
use super::{Connector, TableStore};
use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<SqlValue>>,
}

type SharedTables = Rc<RefCell<BTreeMap<String, MemoryTable>>>;

/// Stored name of `table_name`, matched case-insensitively like SQLite's
/// `COLLATE NOCASE` lookup
fn stored_name(tables: &BTreeMap<String, MemoryTable>, table_name: &str) -> Option<String> {
    tables
        .keys()
        .find(|name| name.eq_ignore_ascii_case(table_name))
        .cloned()
}

/// Hands out connections to one shared set of in-memory tables
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    tables: SharedTables,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all tables, sorted
    pub fn table_names(&self) -> Vec<String> {
        self.tables.borrow().keys().cloned().collect()
    }

    /// Copy of a table's rows, if the table exists
    pub fn rows(&self, table_name: &str) -> Option<Vec<Vec<SqlValue>>> {
        let tables = self.tables.borrow();
        stored_name(&tables, table_name)
            .and_then(|name| tables.get(&name))
            .map(|table| table.rows.clone())
    }

    pub fn row_count(&self, table_name: &str) -> usize {
        self.rows(table_name).map_or(0, |rows| rows.len())
    }
}

impl Connector for MemoryConnector {
    type Store = MemoryStore;

    fn connect(&self) -> Result<MemoryStore> {
        Ok(MemoryStore {
            tables: Rc::clone(&self.tables),
        })
    }

    fn describe(&self) -> String {
        "in-memory store (dry run)".to_string()
    }
}

/// Connection to a [`MemoryConnector`]'s tables
#[derive(Debug)]
pub struct MemoryStore {
    tables: SharedTables,
}

impl TableStore for MemoryStore {
    fn table_exists(&mut self, table_name: &str) -> Result<bool> {
        Ok(stored_name(&self.tables.borrow(), table_name).is_some())
    }

    fn create_table(&mut self, table_name: &str, schema: &TableSchema) -> Result<()> {
        let mut tables = self.tables.borrow_mut();
        if let Some(existing) = stored_name(&tables, table_name) {
            return Err(Error::storage(format!("table {} already exists", existing)));
        }

        tables.insert(
            table_name.to_string(),
            MemoryTable {
                columns: schema.column_names(),
                rows: Vec::new(),
            },
        );
        Ok(())
    }

    fn insert_rows(
        &mut self,
        table_name: &str,
        schema: &TableSchema,
        rows: &[Vec<SqlValue>],
    ) -> Result<usize> {
        let mut tables = self.tables.borrow_mut();
        let name = stored_name(&tables, table_name)
            .ok_or_else(|| Error::storage(format!("no such table: {}", table_name)))?;

        if let Some(row) = rows.iter().find(|row| row.len() != schema.columns.len()) {
            return Err(Error::storage(format!(
                "{} has {} columns but {} values were supplied",
                table_name,
                schema.columns.len(),
                row.len()
            )));
        }

        if let Some(table) = tables.get_mut(&name) {
            table.rows.extend(rows.iter().cloned());
        }
        Ok(rows.len())
    }
}
