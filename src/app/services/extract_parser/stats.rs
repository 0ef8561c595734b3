//! Parsing statistics for customer extract processing

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseStats {
    /// Number of data lines encountered (header and blank lines excluded)
    pub total_lines: usize,

    /// Number of raw records produced
    pub records_parsed: usize,

    /// Number of malformed lines skipped
    pub lines_skipped: usize,

    /// Description of each skipped line, for the run report
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentage of data lines that produced a record
    pub fn success_rate(&self) -> f64 {
        if self.total_lines == 0 {
            100.0
        } else {
            (self.records_parsed as f64 / self.total_lines as f64) * 100.0
        }
    }

    /// Whether any line was skipped
    pub fn has_skipped_lines(&self) -> bool {
        self.lines_skipped > 0
    }
}
