//! Destination table definition for country tables
//!
//! Every `Table_<country>` shares [`CUSTOMER_TABLE`]. The schema drives the
//! CREATE TABLE statement and the coercion of enriched records into rows.

use crate::app::models::EnrichedRecord;
use crate::app::services::date_deriver::parse_extract_date;
use crate::config::InvalidDatePolicy;
use crate::{Error, Result};
use chrono::NaiveDate;
use std::fmt;
use tracing::warn;

/// SQL column types used by the destination schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Variable-length string with a maximum character count
    VarChar(usize),
    /// Fixed-length string; values may be shorter but never longer
    Char(usize),
    Date,
    Integer,
}

impl ColumnType {
    /// SQL type name used in DDL
    pub fn sql_type(&self) -> String {
        match self {
            Self::VarChar(n) => format!("VARCHAR({})", n),
            Self::Char(n) => format!("CHAR({})", n),
            Self::Date => "DATE".to_string(),
            Self::Integer => "INT".to_string(),
        }
    }

    /// Maximum text length, for string types
    pub fn max_length(&self) -> Option<usize> {
        match self {
            Self::VarChar(n) | Self::Char(n) => Some(*n),
            Self::Date | Self::Integer => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub column_type: ColumnType,
}

impl Column {
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self { name, column_type }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub columns: &'static [Column],
}

impl TableSchema {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// CREATE TABLE statement for a table with this schema
    pub fn create_table_sql(&self, table_name: &str) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("    {} {}", quote_identifier(c.name), c.column_type.sql_type()))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("CREATE TABLE {} (\n{}\n)", quote_identifier(table_name), columns)
    }

    /// Parameterised INSERT statement covering every column
    pub fn insert_sql(&self, table_name: &str) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| quote_identifier(c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=self.columns.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_identifier(table_name),
            columns,
            placeholders
        )
    }
}

/// Schema shared by every country table
pub static CUSTOMER_TABLE: TableSchema = TableSchema {
    columns: &[
        Column::new("Customer_Name", ColumnType::VarChar(255)),
        Column::new("Customer_Id", ColumnType::VarChar(18)),
        Column::new("Open_Date", ColumnType::Date),
        Column::new("Last_Consulted_Date", ColumnType::Date),
        Column::new("Vaccination_Id", ColumnType::Char(5)),
        Column::new("Dr_Name", ColumnType::VarChar(255)),
        Column::new("State", ColumnType::Char(5)),
        Column::new("Country", ColumnType::Char(5)),
        Column::new("DOB", ColumnType::Date),
        Column::new("Is_Active", ColumnType::Char(1)),
        Column::new("Age", ColumnType::Integer),
        Column::new("Days_Since_Last_Consulted", ColumnType::Integer),
    ],
};

/// Quote an SQL identifier, doubling any embedded quotes
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// A typed cell value ready for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Null,
    Text(String),
    Integer(i64),
    Date(NaiveDate),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Text(s) => write!(f, "{}", s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Date(d) => write!(f, "{}", d),
        }
    }
}

/// Uncoerced value of one record attribute
#[derive(Debug, Clone, Copy)]
enum FieldValue<'a> {
    Text(&'a str),
    Integer(Option<i64>),
}

/// Record attributes in [`CUSTOMER_TABLE`] column order
fn record_values(record: &EnrichedRecord) -> [FieldValue<'_>; 12] {
    [
        FieldValue::Text(&record.customer_name),
        FieldValue::Text(&record.customer_id),
        FieldValue::Text(&record.open_date),
        FieldValue::Text(&record.last_consulted_date),
        FieldValue::Text(&record.vaccination_id),
        FieldValue::Text(&record.dr_name),
        FieldValue::Text(&record.state),
        FieldValue::Text(&record.country),
        FieldValue::Text(&record.dob),
        FieldValue::Text(&record.is_active),
        FieldValue::Integer(record.age.map(i64::from)),
        FieldValue::Integer(record.days_since_last_consulted),
    ]
}

/// Coerce an enriched record into a [`CUSTOMER_TABLE`] row
///
/// Empty text becomes NULL. Over-length strings fail. Date columns accept
/// DDMMYYYY; anything else fails or becomes NULL per `invalid_dates`.
pub fn build_row(
    table_name: &str,
    record: &EnrichedRecord,
    invalid_dates: InvalidDatePolicy,
) -> Result<Vec<SqlValue>> {
    CUSTOMER_TABLE
        .columns
        .iter()
        .zip(record_values(record))
        .map(|(column, value)| coerce_value(table_name, column, value, invalid_dates, record))
        .collect()
}

fn coerce_value(
    table_name: &str,
    column: &Column,
    value: FieldValue<'_>,
    invalid_dates: InvalidDatePolicy,
    record: &EnrichedRecord,
) -> Result<SqlValue> {
    match (column.column_type, value) {
        (ColumnType::Integer, FieldValue::Integer(v)) => {
            Ok(v.map(SqlValue::Integer).unwrap_or(SqlValue::Null))
        }
        (_, FieldValue::Text(text)) if text.trim().is_empty() => Ok(SqlValue::Null),
        (ColumnType::VarChar(max) | ColumnType::Char(max), FieldValue::Text(text)) => {
            let length = text.chars().count();
            if length > max {
                return Err(Error::type_coercion(
                    table_name,
                    column.name,
                    text,
                    format!(
                        "{} characters exceeds {}",
                        length,
                        column.column_type.sql_type()
                    ),
                ));
            }
            Ok(SqlValue::Text(text.to_string()))
        }
        (ColumnType::Date, FieldValue::Text(text)) => match parse_extract_date(text) {
            Ok(date) => Ok(SqlValue::Date(date)),
            Err(e) => match invalid_dates {
                InvalidDatePolicy::Reject => Err(Error::type_coercion(
                    table_name,
                    column.name,
                    text,
                    e.to_string(),
                )),
                InvalidDatePolicy::Null => {
                    warn!(
                        "Line {}: storing NULL for {}.{}: {}",
                        record.line_number, table_name, column.name, e
                    );
                    Ok(SqlValue::Null)
                }
            },
        },
        (ColumnType::Integer, FieldValue::Text(text)) => Err(Error::type_coercion(
            table_name,
            column.name,
            text,
            "text value for INT column",
        )),
        (_, FieldValue::Integer(v)) => Err(Error::type_coercion(
            table_name,
            column.name,
            v.map(|i| i.to_string()).unwrap_or_default(),
            format!("integer value for {} column", column.column_type.sql_type()),
        )),
    }
}
