//! On-demand creation of country tables

use crate::Result;
use crate::constants::table_name_for;
use tracing::{debug, info};

use super::TableStore;
use super::schema::CUSTOMER_TABLE;

/// Make sure `Table_<country_code>` exists, creating it if absent
///
/// Returns `true` if the table was created by this call. Calling it again for
/// an existing table is a no-op. Existence check and creation are not atomic:
/// two concurrent runs can race here.
pub fn ensure_table<S>(store: &mut S, country_code: &str) -> Result<bool>
where
    S: TableStore + ?Sized,
{
    let table_name = table_name_for(country_code);

    if store.table_exists(&table_name)? {
        debug!("Table {} already exists", table_name);
        return Ok(false);
    }

    info!("Creating table {}", table_name);
    store.create_table(&table_name, &CUSTOMER_TABLE)?;
    Ok(true)
}
