//! Record processing module for customer extracts
//!
//! This module takes the raw records produced by the extract parser and turns
//! them into per-country partitions of enriched records, ready to persist.
//!
//! # Architecture
//!
//! - [`processor`] - Main RecordProcessor struct and pipeline orchestration
//! - [`filter`] - Detail record selection and mandatory field validation
//! - [`enrichment`] - Age and days-since-last-consulted derivation
//! - [`router`] - Grouping of enriched records by country code
//! - [`stats`] - Processing statistics and result structures
//!
//! # Processing Pipeline
//!
//! 1. **Filtering**: keep `D` records, then drop records missing a mandatory field
//! 2. **Derivation**: build an [`EnrichedRecord`](crate::app::models::EnrichedRecord)
//!    against one reference date fixed for the whole run
//! 3. **Routing**: partition by country, preserving input order within a partition
//!
//! # Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use customer_loader::app::models::RawRecord;
//! use customer_loader::app::services::record_processor::RecordProcessor;
//!
//! # fn example() -> customer_loader::Result<()> {
//! let fields = ["D", "Alex", "1", "20101012", "13012012", "MVD", "Paul", "SA", "US", "06031987", "A"];
//! let raw = RawRecord::from_fields(2, fields).unwrap();
//!
//! let processor = RecordProcessor::new(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
//! let result = processor.process(vec![Ok(raw)])?;
//!
//! assert_eq!(result.partitions.len(), 1);
//! println!("{}", result.stats.summary());
//! # Ok(())
//! # }
//! ```

pub mod enrichment;
pub mod filter;
pub mod processor;
pub mod router;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use processor::RecordProcessor;
pub use router::{CountryPartition, RoutingResult, route_by_country};
pub use stats::{ProcessingResult, ProcessingStats};

// Re-export utility functions that might be useful externally
pub use enrichment::enrich_record;
pub use filter::{FilterOutcome, classify_record};
