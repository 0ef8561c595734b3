//! Country routing for enriched records
//!
//! Groups records by country code. Partitions come out in the order their
//! country was first seen, and records keep their input order within a
//! partition.

use crate::app::models::EnrichedRecord;
use crate::constants::table_name_for;
use std::collections::HashMap;
use tracing::warn;

/// All records for one country, destined for one table
#[derive(Debug, Clone, PartialEq)]
pub struct CountryPartition {
    /// Trimmed country code
    pub country_code: String,
    /// Records in input order
    pub records: Vec<EnrichedRecord>,
}

impl CountryPartition {
    /// Destination table for this partition
    pub fn table_name(&self) -> String {
        table_name_for(&self.country_code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Output of routing a record sequence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutingResult {
    /// Partitions in first-discovery order
    pub partitions: Vec<CountryPartition>,
    /// Records with a blank country code, which cannot name a table
    pub unroutable: usize,
}

impl RoutingResult {
    /// Total number of records across all partitions
    pub fn routed_count(&self) -> usize {
        self.partitions.iter().map(CountryPartition::len).sum()
    }
}

/// Partition enriched records by country code
pub fn route_by_country<I>(records: I) -> RoutingResult
where
    I: IntoIterator<Item = EnrichedRecord>,
{
    let mut result = RoutingResult::default();
    let mut index_by_country: HashMap<String, usize> = HashMap::new();

    for record in records {
        let country_code = record.country_code();

        if country_code.is_empty() {
            warn!(
                "Line {}: customer {} has no country code and cannot be routed",
                record.line_number, record.customer_id
            );
            result.unroutable += 1;
            continue;
        }

        match index_by_country.get(country_code) {
            Some(&index) => result.partitions[index].records.push(record),
            None => {
                let country_code = country_code.to_string();
                index_by_country.insert(country_code.clone(), result.partitions.len());
                result.partitions.push(CountryPartition {
                    country_code,
                    records: vec![record],
                });
            }
        }
    }

    result
}
