//! SQLite-backed table store

use rusqlite::types::{ToSql, ToSqlOutput, Value};
use rusqlite::{Connection, params_from_iter};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use super::schema::{SqlValue, TableSchema, quote_identifier};
use super::{Connector, TableStore};
use crate::config::DatabaseConfig;
use crate::{Error, Result};

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            SqlValue::Null => Ok(ToSqlOutput::Owned(Value::Null)),
            SqlValue::Text(text) => text.to_sql(),
            SqlValue::Integer(value) => value.to_sql(),
            SqlValue::Date(date) => date.to_sql(),
        }
    }
}

/// Opens one SQLite connection per [`Connector::connect`] call
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: Duration::from_millis(crate::constants::DEFAULT_BUSY_TIMEOUT_MS),
        }
    }

    /// Build a connector from the database section of the configuration
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            path: config.database_path(),
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Connector for SqliteConnector {
    type Store = SqliteStore;

    fn connect(&self) -> Result<SqliteStore> {
        debug!("Opening SQLite connection to {}", self.path.display());

        let conn = Connection::open(&self.path).map_err(|e| {
            Error::sqlite(format!("Failed to open database {}", self.path.display()), e)
        })?;
        conn.busy_timeout(self.busy_timeout)
            .map_err(|e| Error::sqlite("Failed to set busy timeout", e))?;

        Ok(SqliteStore { conn })
    }

    fn describe(&self) -> String {
        format!("sqlite://{}", self.path.display())
    }
}

/// An open SQLite connection; closed when dropped
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Number of rows currently in a table
    pub fn row_count(&self, table_name: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table_name));
        self.conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| Error::sqlite(format!("Failed to count rows in {}", table_name), e))
    }

    /// Names of all user tables, sorted
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }
}

impl TableStore for SqliteStore {
    fn table_exists(&mut self, table_name: &str) -> Result<bool> {
        // SQLite identifiers are case-insensitive
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name = ?1 COLLATE NOCASE",
                [table_name],
                |row| row.get(0),
            )
            .map_err(|e| Error::sqlite(format!("Failed to look up table {}", table_name), e))?;
        Ok(count > 0)
    }

    fn create_table(&mut self, table_name: &str, schema: &TableSchema) -> Result<()> {
        let sql = schema.create_table_sql(table_name);
        debug!("Executing DDL:\n{}", sql);
        self.conn
            .execute_batch(&sql)
            .map_err(|e| Error::sqlite(format!("Failed to create table {}", table_name), e))
    }

    fn insert_rows(
        &mut self,
        table_name: &str,
        schema: &TableSchema,
        rows: &[Vec<SqlValue>],
    ) -> Result<usize> {
        let sql = schema.insert_sql(table_name);
        let tx = self.conn.transaction().map_err(|e| {
            Error::sqlite(format!("Failed to begin transaction for {}", table_name), e)
        })?;

        {
            let mut stmt = tx
                .prepare(&sql)
                .map_err(|e| Error::sqlite(format!("Failed to prepare insert into {}", table_name), e))?;

            for row in rows {
                stmt.execute(params_from_iter(row.iter())).map_err(|e| {
                    Error::sqlite(format!("Failed to insert row into {}", table_name), e)
                })?;
            }
        }

        tx.commit()
            .map_err(|e| Error::sqlite(format!("Failed to commit rows to {}", table_name), e))?;
        Ok(rows.len())
    }
}
