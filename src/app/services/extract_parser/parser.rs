//! Core extract parser implementation
//!
//! This module configures the delimited reader and provides the lazy
//! iterator that turns data lines into raw records.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use super::stats::ParseStats;
use crate::app::models::RawRecord;
use crate::config::MalformedLinePolicy;
use crate::constants::{EXPECTED_FIELD_COUNT, FIELD_DELIMITER};
use crate::{Error, Result};

/// Parser for pipe-delimited customer extracts
#[derive(Debug, Clone, Copy)]
pub struct ExtractParser {
    policy: MalformedLinePolicy,
}

impl ExtractParser {
    /// Create a parser that applies `policy` to lines with the wrong field count
    pub fn new(policy: MalformedLinePolicy) -> Self {
        Self { policy }
    }

    /// Policy applied to malformed data lines
    pub fn policy(&self) -> MalformedLinePolicy {
        self.policy
    }

    /// Open an extract file and return its records as a lazy sequence
    pub fn open(&self, path: &Path) -> Result<ExtractRecords<File>> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        info!("Parsing customer extract: {}", path.display());

        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;

        Ok(self.parse_reader(file, path.display().to_string()))
    }

    /// Parse an extract from any byte stream
    ///
    /// `source` names the stream in diagnostics.
    pub fn parse_reader<R: Read>(&self, reader: R, source: impl Into<String>) -> ExtractRecords<R> {
        // The header is consumed by the reader and never inspected; `flexible`
        // lets lines of any width through so the field count is checked here.
        // Quotes are ordinary text: a field never spans a delimiter or a line.
        let reader = csv::ReaderBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        ExtractRecords {
            records: reader.into_records(),
            policy: self.policy,
            source: source.into(),
            stats: ParseStats::new(),
            finished: false,
        }
    }
}

/// Lazy, single-pass sequence of records from one extract
///
/// Yields `Ok(RawRecord)` per well-formed data line. Ends after the last line
/// or after the first error it yields.
pub struct ExtractRecords<R> {
    records: csv::StringRecordsIntoIter<R>,
    policy: MalformedLinePolicy,
    source: String,
    stats: ParseStats,
    finished: bool,
}

impl<R: Read> ExtractRecords<R> {
    /// Statistics for the lines consumed so far
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Consume the sequence and return its statistics
    pub fn into_stats(self) -> ParseStats {
        self.stats
    }

    /// Apply the malformed-line policy; `Some` means the sequence must yield it
    fn reject_line(&mut self, line: u64, reason: String, error: Error) -> Option<Result<RawRecord>> {
        match self.policy {
            MalformedLinePolicy::Skip => {
                warn!("Skipping malformed line {} in {}: {}", line, self.source, reason);
                self.stats.lines_skipped += 1;
                self.stats.errors.push(format!("Line {}: {}", line, reason));
                None
            }
            MalformedLinePolicy::Abort => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

impl<R: Read> Iterator for ExtractRecords<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let Some(result) = self.records.next() else {
                self.finished = true;
                debug!(
                    "Finished {}: {} records from {} data lines",
                    self.source, self.stats.records_parsed, self.stats.total_lines
                );
                return None;
            };

            self.stats.total_lines += 1;

            match result {
                Ok(record) => {
                    let line = record.position().map(|p| p.line()).unwrap_or(0);

                    match RawRecord::from_fields(line, record.iter()) {
                        Some(raw) => {
                            self.stats.records_parsed += 1;
                            return Some(Ok(raw));
                        }
                        None => {
                            let found = record.len();
                            let reason = format!(
                                "expected {} fields, found {}",
                                EXPECTED_FIELD_COUNT, found
                            );
                            let error = Error::malformed_line(line, EXPECTED_FIELD_COUNT, found);
                            if let Some(rejection) = self.reject_line(line, reason, error) {
                                return Some(rejection);
                            }
                        }
                    }
                }
                // Undecodable text is a per-line problem, anything else is fatal
                Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    let reason = "not valid UTF-8".to_string();
                    let error = Error::csv_parsing(
                        self.source.clone(),
                        format!("Line {} is not valid UTF-8", line),
                        Some(e),
                    );
                    if let Some(rejection) = self.reject_line(line, reason, error) {
                        return Some(rejection);
                    }
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(Error::csv_parsing(
                        self.source.clone(),
                        format!("Failed to read data line {}", self.stats.total_lines),
                        Some(e),
                    )));
                }
            }
        }
    }
}
