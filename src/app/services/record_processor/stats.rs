//! Processing statistics and result structures for the record pipeline
//!
//! This module provides types for tracking how many records each stage
//! dropped and for handing the routed partitions to the persistence stage.

use super::router::CountryPartition;
use std::collections::BTreeMap;

/// Statistics for record processing operations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingStats {
    /// Total number of raw records received from the parser
    pub total_input: usize,
    /// Records dropped because they were not tagged `D`
    pub non_detail_dropped: usize,
    /// Detail records dropped per first missing mandatory field
    pub missing_field_dropped: BTreeMap<String, usize>,
    /// Records that passed filtering and were enriched
    pub validated: usize,
    /// Enriched records whose DOB did not parse
    pub age_unavailable: usize,
    /// Enriched records whose last consulted date did not parse or was empty
    pub days_since_unavailable: usize,
    /// Records dropped by the router for lacking a country code
    pub unroutable: usize,
    /// Records placed in a country partition
    pub final_output: usize,
}

impl ProcessingStats {
    /// Create new empty processing statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a record dropped for a missing mandatory field
    pub fn record_missing_field(&mut self, field: &str) {
        *self
            .missing_field_dropped
            .entry(field.to_string())
            .or_insert(0) += 1;
    }

    /// Total records dropped for missing mandatory fields
    pub fn validation_dropped(&self) -> usize {
        self.missing_field_dropped.values().sum()
    }

    /// Detail records seen (validated or not)
    pub fn detail_records(&self) -> usize {
        self.total_input - self.non_detail_dropped
    }

    /// Percentage of detail records that reached a partition
    pub fn success_rate(&self) -> f64 {
        let detail = self.detail_records();
        if detail == 0 {
            100.0
        } else {
            (self.final_output as f64 / detail as f64) * 100.0
        }
    }

    /// Get summary of processing pipeline statistics
    pub fn summary(&self) -> String {
        format!(
            "Processing Summary: {} records -> {} routed ({:.1}% of detail records) | \
             Non-detail: {} | Missing fields: {} | Unroutable: {} | \
             Age unavailable: {} | Days since unavailable: {}",
            self.total_input,
            self.final_output,
            self.success_rate(),
            self.non_detail_dropped,
            self.validation_dropped(),
            self.unroutable,
            self.age_unavailable,
            self.days_since_unavailable
        )
    }
}

/// Result of record processing operations
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// Country partitions in discovery order
    pub partitions: Vec<CountryPartition>,
    /// Processing statistics
    pub stats: ProcessingStats,
}

impl ProcessingResult {
    /// Create a new processing result
    pub fn new(partitions: Vec<CountryPartition>, stats: ProcessingStats) -> Self {
        Self { partitions, stats }
    }

    /// Number of records across all partitions
    pub fn record_count(&self) -> usize {
        self.partitions.iter().map(CountryPartition::len).sum()
    }

    /// Country codes in partition order
    pub fn country_codes(&self) -> Vec<&str> {
        self.partitions
            .iter()
            .map(|p| p.country_code.as_str())
            .collect()
    }
}
