//! Command-line argument definitions for the customer loader
//!
//! Defines the CLI surface using the clap derive API. Every option here
//! overrides the matching config file or environment setting.

use crate::config::{MalformedLinePolicy, parse_reference_date};
use crate::{Error, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the customer extract loader
///
/// Loads a pipe-delimited customer extract into per-country tables
/// (`Table_<country>`), creating tables on first use and appending rows.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "customer-loader",
    version,
    about = "Load a pipe-delimited customer extract into per-country database tables",
    long_about = "Parses a customer extract (header line followed by H/D records separated by '|'), \
                  keeps detail records with a name, id and open date, derives age and days since \
                  last consultation, and appends each record to the Table_<country> table for its \
                  country. Tables are created on demand; existing rows are never modified."
)]
pub struct Args {
    /// Path to the extract file
    #[arg(value_name = "EXTRACT")]
    pub input: PathBuf,

    /// Destination database
    ///
    /// Path to an SQLite database file, optionally written as sqlite://PATH.
    /// The file is created if it does not exist.
    #[arg(
        short = 'd',
        long = "database",
        value_name = "URL",
        help = "SQLite database file or sqlite:// URL"
    )]
    pub database: Option<String>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/customer-loader/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Date that ages and day counts are computed against
    ///
    /// Defaults to today's local date. Fix it to make reruns reproducible.
    #[arg(
        long = "reference-date",
        value_name = "YYYY-MM-DD",
        value_parser = parse_reference_date_arg,
        help = "Reference date for age and day-count derivation"
    )]
    pub reference_date: Option<NaiveDate>,

    /// What to do with data lines that do not have exactly 11 fields
    #[arg(
        long = "malformed-lines",
        value_enum,
        value_name = "POLICY",
        help = "Skip malformed lines with a warning, or abort the run"
    )]
    pub malformed_lines: Option<MalformedLinePolicy>,

    /// Run the full pipeline against an in-memory store
    ///
    /// Nothing is written to the database; the report shows what would have
    /// been loaded.
    #[arg(
        long = "dry-run",
        help = "Process the extract without writing to the database"
    )]
    pub dry_run: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

fn parse_reference_date_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_reference_date(value).map_err(|e| e.to_string())
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if self.database.as_deref().is_some_and(|url| url.trim().is_empty()) {
            return Err(Error::configuration("Database url must not be empty"));
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_minimal_args() {
        let args = Args::try_parse_from(["customer-loader", "extract.txt"]).unwrap();

        assert_eq!(args.input, PathBuf::from("extract.txt"));
        assert!(args.database.is_none());
        assert!(args.malformed_lines.is_none());
        assert!(!args.dry_run);
        assert_eq!(args.get_log_level(), "warn");
        assert!(args.show_progress());
    }

    #[test]
    fn test_full_args() {
        let args = Args::try_parse_from([
            "customer-loader",
            "extract.txt",
            "-d",
            "sqlite://out.db",
            "--reference-date",
            "2024-03-10",
            "--malformed-lines",
            "abort",
            "--dry-run",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.database.as_deref(), Some("sqlite://out.db"));
        assert_eq!(args.reference_date, NaiveDate::from_ymd_opt(2024, 3, 10));
        assert_eq!(args.malformed_lines, Some(MalformedLinePolicy::Abort));
        assert!(args.dry_run);
        assert_eq!(args.get_log_level(), "debug");
    }

    #[test]
    fn test_invalid_reference_date() {
        let result =
            Args::try_parse_from(["customer-loader", "extract.txt", "--reference-date", "10032024"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["customer-loader", "x", "-q", "-v"]).is_err());

        let args = Args::try_parse_from(["customer-loader", "x", "-q"]).unwrap();
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_validate_missing_config_file() {
        let args = Args::try_parse_from([
            "customer-loader",
            "x",
            "--config",
            "/no/such/config.toml",
        ])
        .unwrap();
        assert!(matches!(args.validate(), Err(Error::Configuration { .. })));
    }
}
