//! Detail record selection and mandatory field validation
//!
//! Two stages applied in order: records not tagged `D` are dropped, then
//! records missing any mandatory field are dropped. The mandatory checks
//! compose as a logical AND; only the first missing field is reported.

use crate::app::models::RawRecord;
use crate::constants::{DETAIL_RECORD_TYPE, MANDATORY_FIELDS};
use tracing::debug;

use super::stats::ProcessingStats;

/// Result of checking one raw record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Detail record with every mandatory field present
    Accepted,
    /// Header, trailer or any other non-detail row
    NotDetail,
    /// Detail record missing the named mandatory field
    MissingField(&'static str),
}

/// Whether a record is tagged as a detail row
pub fn is_detail_record(record: &RawRecord) -> bool {
    record.record_type == DETAIL_RECORD_TYPE
}

/// First mandatory field that is empty or whitespace-only, in check order
pub fn first_missing_mandatory_field(record: &RawRecord) -> Option<&'static str> {
    MANDATORY_FIELDS
        .iter()
        .copied()
        .find(|field| record.field(field).is_none_or(|value| value.trim().is_empty()))
}

/// Classify a record without side effects
pub fn classify_record(record: &RawRecord) -> FilterOutcome {
    if !is_detail_record(record) {
        return FilterOutcome::NotDetail;
    }

    match first_missing_mandatory_field(record) {
        Some(field) => FilterOutcome::MissingField(field),
        None => FilterOutcome::Accepted,
    }
}

/// Check a record and record why it was dropped, if it was
///
/// Returns `true` when the record should continue through the pipeline.
pub fn accept_record(record: &RawRecord, stats: &mut ProcessingStats) -> bool {
    match classify_record(record) {
        FilterOutcome::Accepted => true,
        FilterOutcome::NotDetail => {
            debug!(
                "Line {} dropped: record type '{}' is not a detail record",
                record.line_number, record.record_type
            );
            stats.non_detail_dropped += 1;
            false
        }
        FilterOutcome::MissingField(field) => {
            debug!(
                "Line {} dropped: mandatory field {} is empty",
                record.line_number, field
            );
            stats.record_missing_field(field);
            false
        }
    }
}
