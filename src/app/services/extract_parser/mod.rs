//! Parser for pipe-delimited customer extracts
//!
//! The extract is one header line followed by data lines of exactly eleven
//! `|`-separated positional fields. The header is discarded without being
//! checked; data lines are turned into [`RawRecord`](crate::app::models::RawRecord)s
//! lazily, one per `next()` call.
//!
//! ## Architecture
//!
//! - [`parser`] - Reader setup and the lazy record iterator
//! - [`stats`] - Parsing statistics
//!
//! ## Malformed lines
//!
//! A data line that does not split into eleven fields is handled according to
//! [`MalformedLinePolicy`](crate::config::MalformedLinePolicy): `Skip` logs the
//! line and moves on, `Abort` yields an error and ends the sequence.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use customer_loader::app::services::extract_parser::ExtractParser;
//! use customer_loader::config::MalformedLinePolicy;
//!
//! # fn example() -> customer_loader::Result<()> {
//! let parser = ExtractParser::new(MalformedLinePolicy::Skip);
//! let mut records = parser.open(std::path::Path::new("Customer.txt"))?;
//!
//! for record in records.by_ref() {
//!     let record = record?;
//!     println!("{} -> {}", record.customer_id, record.country);
//! }
//! println!("Skipped {} malformed lines", records.stats().lines_skipped);
//! # Ok(())
//! # }
//! ```

pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::{ExtractParser, ExtractRecords};
pub use stats::ParseStats;
