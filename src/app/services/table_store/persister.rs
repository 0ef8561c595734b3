//! Append-only writes of enriched records to country tables
//!
//! Records are always inserted as new rows; nothing is updated or merged, so
//! a customer loaded by two runs appears twice.

use crate::Result;
use crate::app::models::EnrichedRecord;
use crate::config::InvalidDatePolicy;
use crate::constants::table_name_for;
use tracing::{debug, info};

use super::TableStore;
use super::schema::{CUSTOMER_TABLE, build_row};

/// Append a batch of records to `Table_<country_code>`
///
/// Every record is coerced before anything is written, so a coercion failure
/// leaves the table untouched. Store errors are returned as-is.
pub fn append<S>(
    store: &mut S,
    country_code: &str,
    records: &[EnrichedRecord],
    invalid_dates: InvalidDatePolicy,
) -> Result<usize>
where
    S: TableStore + ?Sized,
{
    let table_name = table_name_for(country_code);

    let rows = records
        .iter()
        .map(|record| build_row(&table_name, record, invalid_dates))
        .collect::<Result<Vec<_>>>()?;

    if rows.is_empty() {
        debug!("No rows to append to {}", table_name);
        return Ok(0);
    }

    let written = store.insert_rows(&table_name, &CUSTOMER_TABLE, &rows)?;
    info!("Appended {} rows to {}", written, table_name);
    Ok(written)
}
