//! End-to-end load of one extract file
//!
//! Parses the extract lazily, filters and enriches detail records, routes
//! them by country, then provisions and appends one country table at a time.
//! Each partition gets its own store connection, dropped before the next
//! partition starts. A failure in one partition stops the run; partitions
//! already written stay written.

use crate::app::services::extract_parser::{ExtractParser, ExtractRecords, ParseStats};
use crate::app::services::record_processor::{
    CountryPartition, ProcessingStats, RecordProcessor,
};
use crate::app::services::table_store::{Connector, append, ensure_table};
use crate::config::{Config, InvalidDatePolicy};
use crate::Result;
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Outcome of loading one country partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLoad {
    pub country_code: String,
    pub table_name: String,
    pub rows_written: usize,
    /// Whether the table was created by this run
    pub created: bool,
}

/// Everything a run did, for reporting
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub reference_date: NaiveDate,
    pub parse: ParseStats,
    pub processing: ProcessingStats,
    /// Per-table results in partition discovery order
    pub tables: Vec<TableLoad>,
    pub duration: Duration,
}

impl RunSummary {
    pub fn rows_written(&self) -> usize {
        self.tables.iter().map(|t| t.rows_written).sum()
    }

    pub fn tables_created(&self) -> usize {
        self.tables.iter().filter(|t| t.created).count()
    }
}

/// Loads extracts into country tables through a [`Connector`]
#[derive(Debug)]
pub struct LoadPipeline<C: Connector> {
    connector: C,
    parser: ExtractParser,
    processor: RecordProcessor,
    invalid_dates: InvalidDatePolicy,
    show_progress: bool,
}

impl<C: Connector> LoadPipeline<C> {
    /// Build a pipeline from a validated configuration
    ///
    /// The reference date is resolved here, once, so every record in the run
    /// is derived against the same day.
    pub fn new(connector: C, config: &Config) -> Self {
        Self {
            connector,
            parser: ExtractParser::new(config.processing.malformed_lines),
            processor: RecordProcessor::new(config.reference_date()),
            invalid_dates: config.storage.invalid_dates,
            show_progress: false,
        }
    }

    /// Show a progress bar while loading tables
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.processor.reference_date()
    }

    /// Load an extract file
    pub fn run(&self, path: &Path) -> Result<RunSummary> {
        info!("Loading extract {}", path.display());
        let records = self.parser.open(path)?;
        self.load(records)
    }

    /// Load an extract from any reader; `source` names it in errors
    pub fn run_reader<R: Read>(&self, reader: R, source: &str) -> Result<RunSummary> {
        info!("Loading extract from {}", source);
        let records = self.parser.parse_reader(reader, source);
        self.load(records)
    }

    fn load<R: Read>(&self, mut records: ExtractRecords<R>) -> Result<RunSummary> {
        let start = Instant::now();

        let result = self.processor.process(records.by_ref())?;
        let parse = records.into_stats();
        debug!(
            "Parsed {} lines: {} records, {} skipped",
            parse.total_lines, parse.records_parsed, parse.lines_skipped
        );

        let tables = self.load_partitions(&result.partitions)?;

        let summary = RunSummary {
            reference_date: self.processor.reference_date(),
            parse,
            processing: result.stats,
            tables,
            duration: start.elapsed(),
        };

        info!(
            "Loaded {} rows into {} tables via {}",
            summary.rows_written(),
            summary.tables.len(),
            self.connector.describe()
        );
        Ok(summary)
    }

    fn load_partitions(&self, partitions: &[CountryPartition]) -> Result<Vec<TableLoad>> {
        let progress = self.progress_bar(partitions.len());
        let mut loads = Vec::with_capacity(partitions.len());

        for partition in partitions {
            progress.set_message(partition.table_name());

            match self.load_partition(partition) {
                Ok(load) => {
                    info!(
                        "{}: {} rows appended{}",
                        load.table_name,
                        load.rows_written,
                        if load.created { " (table created)" } else { "" }
                    );
                    loads.push(load);
                }
                Err(e) => {
                    progress.abandon_with_message(format!("Failed on {}", partition.table_name()));
                    error!(
                        "Loading {} failed after {} of {} tables were written: {}",
                        partition.table_name(),
                        loads.len(),
                        partitions.len(),
                        e
                    );
                    return Err(e);
                }
            }

            progress.inc(1);
        }

        progress.finish_with_message("Load complete");
        Ok(loads)
    }

    fn load_partition(&self, partition: &CountryPartition) -> Result<TableLoad> {
        let mut store = self.connector.connect()?;

        let created = ensure_table(&mut store, &partition.country_code)?;
        let rows_written = append(
            &mut store,
            &partition.country_code,
            &partition.records,
            self.invalid_dates,
        )?;

        Ok(TableLoad {
            country_code: partition.country_code.clone(),
            table_name: partition.table_name(),
            rows_written,
            created,
        })
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb
    }
}
