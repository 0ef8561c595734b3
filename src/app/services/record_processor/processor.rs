//! Main record processor implementation and pipeline orchestration
//!
//! This module coordinates filtering, derivation and routing for one run.

use crate::Result;
use crate::app::models::RawRecord;
use chrono::NaiveDate;
use tracing::{debug, info};

use super::{
    enrichment::enrich_and_track,
    filter::accept_record,
    router::route_by_country,
    stats::{ProcessingResult, ProcessingStats},
};

/// Record processor for customer extract data
///
/// Holds the reference date used for every derivation in a run, so all
/// records are aged against the same day.
#[derive(Debug, Clone, Copy)]
pub struct RecordProcessor {
    reference_date: NaiveDate,
}

impl RecordProcessor {
    /// Create a processor deriving ages and day counts against `reference_date`
    pub fn new(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    /// Reference date fixed for this processor
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Filter, enrich and route a sequence of parsed records
    ///
    /// The sequence is consumed lazily; the first `Err` it yields stops
    /// processing and is returned. Routing only starts once the whole
    /// sequence has been filtered and enriched.
    pub fn process<I>(&self, records: I) -> Result<ProcessingResult>
    where
        I: IntoIterator<Item = Result<RawRecord>>,
    {
        let mut stats = ProcessingStats::new();
        let mut enriched = Vec::new();

        info!(
            "Starting record processing with reference date {}",
            self.reference_date
        );

        for record in records {
            let record = record?;
            stats.total_input += 1;

            if !accept_record(&record, &mut stats) {
                continue;
            }

            enriched.push(enrich_and_track(record, self.reference_date, &mut stats));
        }
        stats.validated = enriched.len();

        let routing = route_by_country(enriched);
        stats.unroutable = routing.unroutable;
        stats.final_output = routing.routed_count();

        info!(
            "Record processing complete: {} -> {} records in {} country partitions",
            stats.total_input,
            stats.final_output,
            routing.partitions.len()
        );
        debug!("{}", stats.summary());

        Ok(ProcessingResult::new(routing.partitions, stats))
    }
}
