//! Derived attribute enrichment for validated records
//!
//! Each validated raw record becomes a new, immutable enriched record with
//! `age` and `days_since_last_consulted` computed against the run's
//! reference date.

use crate::app::models::{EnrichedRecord, RawRecord};
use crate::app::services::date_deriver::{compute_age, compute_days_since};
use chrono::NaiveDate;

use super::stats::ProcessingStats;

/// Build the enriched record for one validated raw record
pub fn enrich_record(raw: RawRecord, reference_date: NaiveDate) -> EnrichedRecord {
    let age = compute_age(&raw.dob, reference_date);
    let days_since_last_consulted = compute_days_since(&raw.last_consulted_date, reference_date);
    EnrichedRecord::from_raw(raw, age, days_since_last_consulted)
}

/// Enrich a record and count derived values that could not be computed
pub fn enrich_and_track(
    raw: RawRecord,
    reference_date: NaiveDate,
    stats: &mut ProcessingStats,
) -> EnrichedRecord {
    let enriched = enrich_record(raw, reference_date);

    if enriched.age.is_none() {
        stats.age_unavailable += 1;
    }
    if enriched.days_since_last_consulted.is_none() {
        stats.days_since_unavailable += 1;
    }

    enriched
}
